use crate::config::MarketConfig;
use crate::error::{CropcastError, Result};
use crate::models::MarketPrice;

pub struct MarketClient {
    client: reqwest::Client,
    config: MarketConfig,
}

impl MarketClient {
    pub fn new(config: MarketConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch the ticker page and extract price rows.
    pub async fn fetch_prices(&self) -> Result<Vec<MarketPrice>> {
        let response = self
            .client
            .get(&self.config.url)
            .send()
            .await
            .map_err(|e| CropcastError::ProviderUnavailable(format!("market ticker: {}", e)))?;

        if !response.status().is_success() {
            return Err(CropcastError::ProviderUnavailable(format!(
                "market ticker returned {}",
                response.status()
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| CropcastError::ProviderUnavailable(format!("market ticker: {}", e)))?;

        Ok(parse_prices(&html))
    }
}

/// Extract price rows from the ticker table. Expected cell order per row:
/// commodity, variety, min price, max price, date. Rows with an empty field
/// or a non-positive price are dropped; output is sorted by commodity name.
pub fn parse_prices(html: &str) -> Vec<MarketPrice> {
    let row_re = regex_lite::Regex::new(r"(?s)<tr[^>]*>(.*?)</tr>").unwrap();
    let cell_re = regex_lite::Regex::new(r"(?s)<td[^>]*>(.*?)</td>").unwrap();
    let tag_re = regex_lite::Regex::new(r"<[^>]+>").unwrap();

    let mut prices: Vec<MarketPrice> = Vec::new();

    for row in row_re.captures_iter(html) {
        let cells: Vec<String> = cell_re
            .captures_iter(&row[1])
            .map(|c| tag_re.replace_all(&c[1], "").trim().to_string())
            .collect();

        if cells.len() < 5 {
            continue;
        }

        let commodity = cells[0].clone();
        let variety = cells[1].clone();
        let date = cells[4].clone();
        if commodity.is_empty() || variety.is_empty() || date.is_empty() {
            continue;
        }

        let (Some(min_price), Some(max_price)) = (parse_price(&cells[2]), parse_price(&cells[3]))
        else {
            continue;
        };
        if min_price <= 0.0 || max_price <= 0.0 {
            continue;
        }

        prices.push(MarketPrice {
            commodity,
            variety,
            max_price,
            min_price,
            date,
        });
    }

    prices.sort_by(|a, b| a.commodity.cmp(&b.commodity));
    prices
}

fn parse_price(cell: &str) -> Option<f64> {
    cell.replace(',', "").parse().ok()
}
