pub mod nba;
