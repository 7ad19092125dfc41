use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Response shaped like the engine's: warm-up prices, one round trip.
pub fn engine_response() -> Value {
    json!({
        "prices": [100.0, 101.5, 99.0, 102.0, 104.25],
        "trades": [
            {"t": 2, "type": "BUY", "price": 99.0},
            {"t": 4, "type": "SELL", "price": 104.25, "pnl": 5.25}
        ],
        "metrics": {
            "total_pnl": 5.25,
            "num_trades": 1,
            "win_rate": 1.0,
            "max_drawdown": 0.0
        }
    })
}

/// Mounts a `/simulate` handler answering with `template`.
pub async fn mount_simulate(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/simulate"))
        .respond_with(template)
        .mount(server)
        .await;
}
