pub mod football_api;

pub use football_api::FootballApiClient;
