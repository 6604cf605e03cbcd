pub mod market;
pub mod openweathermap;

pub use market::MarketClient;
pub use openweathermap::OpenWeatherMapClient;
