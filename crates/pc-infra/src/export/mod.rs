mod text_exporter;

pub use text_exporter::DatedTextExporter;
