use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::analytics::RunReport;
use crate::engine::{build_request, SimulationEngine, SimulationRequest};
use crate::error::ClientError;
use crate::models::{RunParameters, SimulationResult, Strategy};

#[derive(Debug, Clone, PartialEq)]
pub enum RunState {
    Ready,
    Running,
    Error { kind: &'static str, message: String },
}

/// A submitted run. Hand `id` back to [`Session::complete_run`] with the
/// engine's answer.
#[derive(Debug, Clone)]
pub struct RunTicket {
    pub id: u64,
    pub request: SimulationRequest,
}

/// One configuration session: the strategy draft, run parameters and the
/// latest result.
///
/// Runs move `Ready -> Running -> Ready | Error`. Only one run is in flight;
/// a submit while running is coalesced into the outstanding one, and a
/// completion for anything but the outstanding ticket is discarded. A failed
/// run never touches the previous result.
pub struct Session {
    strategy: Strategy,
    params: RunParameters,
    result: Option<SimulationResult>,
    completed_at: Option<DateTime<Utc>>,
    state: RunState,
    last_ticket: u64,
    in_flight: Option<u64>,
}

impl Session {
    pub fn new(params: RunParameters) -> Self {
        Self::with_strategy(Strategy::default(), params)
    }

    pub fn with_strategy(strategy: Strategy, params: RunParameters) -> Self {
        Self {
            strategy,
            params,
            result: None,
            completed_at: None,
            state: RunState::Ready,
            last_ticket: 0,
            in_flight: None,
        }
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn params(&self) -> &RunParameters {
        &self.params
    }

    pub fn result(&self) -> Option<&SimulationResult> {
        self.result.as_ref()
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// When the current result arrived.
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn report(&self) -> Option<RunReport> {
        self.result.as_ref().map(RunReport::from_result)
    }

    /// Replaces the draft with an edited copy, e.g.
    /// `session.edit_strategy(|s| s.remove_condition(Side::Buy, 0))`.
    pub fn edit_strategy<F>(&mut self, edit: F)
    where
        F: FnOnce(&Strategy) -> Strategy,
    {
        self.strategy = edit(&self.strategy);
    }

    pub fn set_params(&mut self, params: RunParameters) {
        self.params = params;
    }

    /// Snapshots the draft into a request and marks the session busy.
    /// Returns `None` while another run is outstanding.
    pub fn begin_run(&mut self) -> Option<RunTicket> {
        if let Some(id) = self.in_flight {
            debug!("Run #{} still outstanding, ignoring submit", id);
            return None;
        }

        if let Err(e) = self.params.validate() {
            warn!("Submitting anyway: {}", e);
        }

        self.last_ticket += 1;
        let id = self.last_ticket;
        self.in_flight = Some(id);
        self.state = RunState::Running;

        info!(
            "Run #{}: market={} timesteps={} seed={} buy_rules={} sell_rules={}",
            id,
            self.params.market,
            self.params.timesteps,
            self.params.seed,
            self.strategy.buy.len(),
            self.strategy.sell.len()
        );

        Some(RunTicket {
            id,
            request: build_request(&self.strategy, &self.params),
        })
    }

    /// Applies the outcome of run `id`. Returns false if the run was no
    /// longer outstanding and the outcome was dropped.
    pub fn complete_run(
        &mut self,
        id: u64,
        outcome: Result<SimulationResult, ClientError>,
    ) -> bool {
        if self.in_flight != Some(id) {
            debug!("Discarding completion of stale run #{}", id);
            return false;
        }
        self.in_flight = None;

        match outcome {
            Ok(result) => {
                let report = RunReport::from_result(&result);
                for mm in &report.mismatches {
                    warn!(
                        "Run #{}: engine {} = {} but trade log gives {}",
                        id, mm.metric, mm.reported, mm.derived
                    );
                }
                if report.trades_outside_series > 0 {
                    warn!(
                        "Run #{}: {} trade(s) past the end of {} prices",
                        id,
                        report.trades_outside_series,
                        result.prices.len()
                    );
                }
                info!(
                    "Run #{} complete: total_pnl={:.2} trades={}",
                    id, result.metrics.total_pnl, result.metrics.num_trades
                );

                self.result = Some(result);
                self.completed_at = Some(Utc::now());
                self.state = RunState::Ready;
            }
            Err(e) => {
                error!("Run #{} failed ({}): {}", id, e.kind(), e);
                self.state = RunState::Error {
                    kind: e.kind(),
                    message: e.to_string(),
                };
            }
        }
        true
    }

    /// Abandons the outstanding run; its late completion will be discarded.
    pub fn cancel_run(&mut self) {
        if let Some(id) = self.in_flight.take() {
            info!("Run #{} cancelled", id);
            self.state = RunState::Ready;
        }
    }

    /// Submits the draft and waits for the engine. Returns true when a new
    /// result was stored.
    pub async fn run(&mut self, engine: &dyn SimulationEngine) -> bool {
        let Some(ticket) = self.begin_run() else {
            return false;
        };
        let outcome = engine.simulate(&ticket.request).await;
        let succeeded = outcome.is_ok();
        self.complete_run(ticket.id, outcome) && succeeded
    }
}
