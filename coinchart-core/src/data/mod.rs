//! Market data acquisition: transport seam, provider trait, CoinGecko client.

pub mod coingecko;
pub mod provider;
pub mod transport;

pub use coingecko::{parse_catalog, parse_market_chart, CoinGeckoProvider, DEFAULT_BASE_URL};
pub use provider::MarketDataProvider;
pub use transport::{
    HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError, DEFAULT_TIMEOUT,
};
