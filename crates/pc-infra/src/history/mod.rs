mod file_repo;
mod mapper;

pub use file_repo::JsonFileHistoryRepository;
