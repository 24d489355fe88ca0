use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use rand::rngs::StdRng;
use ratatui::widgets::TableState;

use crate::advisor::{NegotiationRequest, Recommendation};
use crate::engine::{SupplierRecord, Weights};
use crate::pipeline::{compute, SupplierRow};
use crate::po::draft_po;

const WEIGHT_STEP: f64 = 0.05;
const DEMAND_STEP: i64 = 100;
const DISRUPTION_STEP: f64 = 5.0;

const DEMAND_MIN: i64 = 100;
const DEMAND_MAX: i64 = 10_000;
const DISRUPTION_MIN: f64 = 0.0;
const DISRUPTION_MAX: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    Cost,
    Quality,
    Delivery,
    Risk,
}

impl Criterion {
    pub fn label(&self) -> &'static str {
        match self {
            Criterion::Cost => "Cost",
            Criterion::Quality => "Quality",
            Criterion::Delivery => "Delivery",
            Criterion::Risk => "Risk",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Criterion::Cost => Criterion::Quality,
            Criterion::Quality => Criterion::Delivery,
            Criterion::Delivery => Criterion::Risk,
            Criterion::Risk => Criterion::Cost,
        }
    }

    pub const ALL: [Criterion; 4] = [
        Criterion::Cost,
        Criterion::Quality,
        Criterion::Delivery,
        Criterion::Risk,
    ];
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    NegotiateInput,
    Advice,
    PoView,
    Help,
}

/// Dashboard state. The base table is immutable once loaded; every control
/// change derives a fresh row set through the pipeline, nothing is edited
/// in place.
pub struct App {
    pub base_table: Vec<SupplierRecord>,
    pub rows: Vec<SupplierRow>,
    pub weights: Weights,
    pub total_demand: i64,
    pub disruption_level: f64,
    pub selected_criterion: Criterion,
    pub table_state: TableState,
    pub input_mode: InputMode,
    pub negotiate_input: String,
    pub advice: Option<Recommendation>,
    pub last_target_price: Option<f64>,
    pub po_text: Option<String>,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub is_advising: bool,
    pub source_label: String,
    rng: StdRng,
}

impl App {
    pub fn new(
        base_table: Vec<SupplierRecord>,
        weights: Weights,
        total_demand: i64,
        disruption_level: f64,
        source_label: String,
        mut rng: StdRng,
    ) -> Result<Self> {
        let rows = compute(
            &base_table,
            &weights,
            total_demand,
            disruption_level,
            &mut rng,
        )?;

        let mut table_state = TableState::default();
        if !rows.is_empty() {
            table_state.select(Some(0));
        }

        Ok(Self {
            base_table,
            rows,
            weights,
            total_demand,
            disruption_level,
            selected_criterion: Criterion::Cost,
            table_state,
            input_mode: InputMode::Normal,
            negotiate_input: String::new(),
            advice: None,
            last_target_price: None,
            po_text: None,
            flash_message: None,
            should_quit: false,
            is_advising: false,
            source_label,
            rng,
        })
    }

    /// Re-derive the row set from the current controls. On failure (e.g.
    /// all weights zeroed) the previous rows stay visible and the error
    /// lands in the flash bar instead of a half-rendered table.
    pub fn recompute(&mut self) {
        match compute(
            &self.base_table,
            &self.weights,
            self.total_demand,
            self.disruption_level,
            &mut self.rng,
        ) {
            Ok(rows) => {
                self.rows = rows;
                self.clamp_selection();
            }
            Err(e) => self.show_flash(format!("Error: {:#}", e)),
        }
    }

    fn clamp_selection(&mut self) {
        if self.rows.is_empty() {
            self.table_state.select(None);
        } else if let Some(selected) = self.table_state.selected() {
            if selected >= self.rows.len() {
                self.table_state.select(Some(self.rows.len() - 1));
            }
        } else {
            self.table_state.select(Some(0));
        }
    }

    pub fn next_row(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i >= self.rows.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.rows.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn selected_row(&self) -> Option<&SupplierRow> {
        self.table_state.selected().and_then(|i| self.rows.get(i))
    }

    pub fn cycle_criterion(&mut self) {
        self.selected_criterion = self.selected_criterion.next();
    }

    pub fn select_criterion(&mut self, criterion: Criterion) {
        self.selected_criterion = criterion;
    }

    pub fn weight_of(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Cost => self.weights.cost,
            Criterion::Quality => self.weights.quality,
            Criterion::Delivery => self.weights.delivery,
            Criterion::Risk => self.weights.risk,
        }
    }

    /// Nudge the selected weight by one slider step, clamped to [0, 1].
    pub fn adjust_weight(&mut self, direction: f64) {
        let slot = match self.selected_criterion {
            Criterion::Cost => &mut self.weights.cost,
            Criterion::Quality => &mut self.weights.quality,
            Criterion::Delivery => &mut self.weights.delivery,
            Criterion::Risk => &mut self.weights.risk,
        };
        *slot = (*slot + direction * WEIGHT_STEP).clamp(0.0, 1.0);
        // Kill float drift so the slider lands on clean steps
        *slot = (*slot / WEIGHT_STEP).round() * WEIGHT_STEP;
        self.recompute();
    }

    pub fn adjust_demand(&mut self, direction: i64) {
        self.total_demand =
            (self.total_demand + direction * DEMAND_STEP).clamp(DEMAND_MIN, DEMAND_MAX);
        self.recompute();
    }

    pub fn adjust_disruption(&mut self, direction: f64) {
        self.disruption_level = (self.disruption_level + direction * DISRUPTION_STEP)
            .clamp(DISRUPTION_MIN, DISRUPTION_MAX);
        self.recompute();
    }

    /// Draw a fresh disruption forecast (the one random column).
    pub fn redraw_forecast(&mut self) {
        self.recompute();
        self.show_flash("New disruption forecast drawn".to_string());
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    pub fn start_negotiate_input(&mut self) {
        if self.selected_row().is_some() {
            self.input_mode = InputMode::NegotiateInput;
            self.negotiate_input.clear();
        }
    }

    /// Parse "offer target" from the input popup. On success the caller
    /// spawns the advisor call; this only builds the request.
    pub fn confirm_negotiate_input(&mut self) -> Option<NegotiationRequest> {
        let supplier = match self.selected_row() {
            Some(row) => row.record.name.clone(),
            None => {
                self.input_mode = InputMode::Normal;
                return None;
            }
        };

        let parts: Vec<&str> = self
            .negotiate_input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();

        let parsed = match parts.as_slice() {
            [offer, target] => match (offer.parse::<f64>(), target.parse::<f64>()) {
                (Ok(offer), Ok(target)) if offer > 0.0 && target > 0.0 => Some((offer, target)),
                _ => None,
            },
            _ => None,
        };

        match parsed {
            Some((offer_price, target_price)) => {
                self.input_mode = InputMode::Normal;
                self.negotiate_input.clear();
                self.last_target_price = Some(target_price);
                self.is_advising = true;
                Some(NegotiationRequest {
                    supplier,
                    offer_price,
                    target_price,
                })
            }
            None => {
                self.show_flash(format!(
                    "Enter two positive prices, e.g. '100 90' (got '{}')",
                    self.negotiate_input
                ));
                self.input_mode = InputMode::Normal;
                self.negotiate_input.clear();
                None
            }
        }
    }

    pub fn cancel_negotiate_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.negotiate_input.clear();
    }

    pub fn set_advice(&mut self, advice: Recommendation) {
        self.is_advising = false;
        self.advice = Some(advice);
        self.input_mode = InputMode::Advice;
    }

    pub fn advice_failed(&mut self, error: String) {
        self.is_advising = false;
        self.show_flash(format!("Advisor failed: {}", error));
    }

    pub fn dismiss_advice(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Draft a PO for the selected supplier using its allocated quantity and
    /// the last negotiated target price (supplier cost when none yet).
    pub fn show_po(&mut self) {
        let row = match self.selected_row() {
            Some(row) => row,
            None => return,
        };
        let price = self.last_target_price.unwrap_or(row.record.cost);
        let po = draft_po(
            &row.record.name,
            row.allocated_qty,
            price,
            Utc::now().date_naive(),
        );
        self.po_text = Some(po);
        self.input_mode = InputMode::PoView;
    }

    pub fn dismiss_po(&mut self) {
        self.po_text = None;
        self.input_mode = InputMode::Normal;
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}
