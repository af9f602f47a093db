/// How a text file is turned into history entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// The whole file becomes a single entry, untrimmed.
    Whole,
    /// Every blank-line separated section becomes its own entry.
    #[default]
    SplitOnBlankLines,
}

/// Cut imported text into entry contents, in the order they should be appended.
///
/// Split mode trims every section, drops empty ones and yields the sections
/// last-to-first. Whole mode yields nothing for blank text.
pub fn import_sections(text: &str, mode: ImportMode) -> Vec<String> {
    match mode {
        ImportMode::Whole => {
            if text.trim().is_empty() {
                Vec::new()
            } else {
                vec![text.to_string()]
            }
        }
        ImportMode::SplitOnBlankLines => text
            .replace("\r\n", "\n")
            .rsplit("\n\n")
            .map(str::trim)
            .filter(|section| !section.is_empty())
            .map(str::to_string)
            .collect(),
    }
}
