//! Dashboard state management
//!
//! Contains the main dashboard state struct, modal machinery, and key routing

use crate::api::types::{
    AccountValuePoint, Conversation, MarketPrices, Model, ModelSeries, NewModel, NewProvider,
    Portfolio, Provider, Settings, SettingsUpdate, Trade, UpdateInfo,
};
use crate::config::Config;
use crate::consts::cli_consts::{DEFAULT_INITIAL_CAPITAL, MAX_ACTIVITY_LOGS};
use crate::environment::Environment;
use crate::events::{Event as WorkerEvent, PendingAction, PollView, TimeRange, ViewMode};
use crate::format::{DisplayMode, Locale};
use crate::workers::actions::UiAction;
use crossterm::event::{KeyCode, KeyEvent};
use std::collections::VecDeque;
use std::time::Instant;

/// Detail tab under the chart in single-model view.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum DetailTab {
    #[default]
    Positions,
    Trades,
    Conversations,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub masked: bool,
}

impl FormField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            masked: false,
        }
    }

    pub fn masked(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            masked: true,
        }
    }
}

/// Text-entry form inside a modal. `focus` walks the fields first; for the
/// provider modal it continues past them onto the existing-provider rows.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub fields: Vec<FormField>,
    pub focus: usize,
}

impl FormState {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields, focus: 0 }
    }

    pub fn focused_field(&self) -> Option<&FormField> {
        self.fields.get(self.focus)
    }

    fn focused_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.focus)
    }

    fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    AddModel(FormState),
    /// Add form plus the existing-provider list (rows selectable past the
    /// last field; `x` deletes, `t` tests the selected provider).
    AddProvider(FormState),
    Settings(FormState),
    /// Password challenge for the pending action.
    Password(FormState),
    /// Update details with dismiss option.
    Update,
    /// Blocking error/result notice.
    Alert(String),
}

/// What a key press asks the app loop to do.
#[derive(Debug, PartialEq)]
pub enum KeyOutcome {
    None,
    Quit,
    /// Send this action to the dispatcher.
    Action(UiAction),
    /// The poll view changed; publish it to the pollers.
    ViewChanged,
}

/// Dashboard state: everything the renderer reads and the updaters write.
#[derive(Debug)]
pub struct DashboardState {
    pub environment: Environment,
    pub start_time: Instant,
    pub locale: Locale,
    pub with_background_color: bool,

    pub view: ViewMode,
    pub time_range: TimeRange,
    pub display_mode: DisplayMode,
    pub tab: DetailTab,
    /// Models panel selection; row 0 is the pinned aggregated entry.
    pub selected_row: usize,

    pub models: Vec<Model>,
    pub providers: Vec<Provider>,
    /// Aggregated snapshot + per-model comparison series.
    pub aggregated_portfolio: Option<Portfolio>,
    pub aggregated_series: Vec<ModelSeries>,
    /// Latest single-model snapshot. Not tagged against the active view;
    /// the last response to arrive wins the render.
    pub model_portfolio: Option<Portfolio>,
    pub model_history: Vec<AccountValuePoint>,
    pub trades: Vec<Trade>,
    pub conversations: Vec<Conversation>,
    pub market_prices: MarketPrices,
    pub settings: Option<Settings>,
    pub provider_model_hints: Vec<String>,

    pub update_info: Option<UpdateInfo>,
    pub config: Config,

    pub modal: Option<Modal>,
    /// Single slot: a second password challenge overwrites the first.
    pub pending_action: Option<PendingAction>,

    pub pending_events: VecDeque<WorkerEvent>,
    pub activity_logs: VecDeque<WorkerEvent>,
    pub tick: usize,

    view_dirty: bool,
}

impl DashboardState {
    pub fn new(
        environment: Environment,
        start_time: Instant,
        time_range: TimeRange,
        with_background_color: bool,
        config: Config,
    ) -> Self {
        Self {
            environment,
            start_time,
            locale: Locale::detect(),
            with_background_color,
            view: ViewMode::Aggregated,
            time_range,
            display_mode: DisplayMode::default(),
            tab: DetailTab::default(),
            selected_row: 0,
            models: Vec::new(),
            providers: Vec::new(),
            aggregated_portfolio: None,
            aggregated_series: Vec::new(),
            model_portfolio: None,
            model_history: Vec::new(),
            trades: Vec::new(),
            conversations: Vec::new(),
            market_prices: MarketPrices::new(),
            settings: None,
            provider_model_hints: Vec::new(),
            update_info: None,
            config,
            modal: None,
            pending_action: None,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            tick: 0,
            view_dirty: false,
        }
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: WorkerEvent) {
        self.pending_events.push_back(event);
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: WorkerEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// The portfolio the stats bar and chart should read for the active view.
    pub fn active_portfolio(&self) -> Option<&Portfolio> {
        match self.view {
            ViewMode::Aggregated => self.aggregated_portfolio.as_ref(),
            ViewMode::SingleModel(_) => self.model_portfolio.as_ref(),
        }
    }

    pub fn initial_capital(&self) -> f64 {
        self.active_portfolio()
            .and_then(|p| p.initial_capital)
            .unwrap_or(DEFAULT_INITIAL_CAPITAL)
    }

    pub fn poll_view(&self) -> PollView {
        PollView {
            view: self.view,
            time_range: self.time_range,
        }
    }

    pub fn set_view(&mut self, view: ViewMode) {
        if self.view != view {
            self.view = view;
            self.view_dirty = true;
        }
    }

    /// True once per view change; the app loop publishes and clears it.
    pub fn take_view_dirty(&mut self) -> bool {
        std::mem::take(&mut self.view_dirty)
    }

    /// Whether the update banner should currently show.
    pub fn update_banner_visible(&self) -> bool {
        self.update_info
            .as_ref()
            .map(|info| info.update_available)
            .unwrap_or(false)
            && self.config.update_notice_visible()
    }

    fn selected_model(&self) -> Option<&Model> {
        self.selected_row
            .checked_sub(1)
            .and_then(|i| self.models.get(i))
    }

    // ------------------------------------------------------------------
    // Key routing
    // ------------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if self.modal.is_some() {
            return self.handle_modal_key(key);
        }
        self.handle_dashboard_key(key)
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => KeyOutcome::Quit,
            KeyCode::Up => {
                self.selected_row = self.selected_row.saturating_sub(1);
                KeyOutcome::None
            }
            KeyCode::Down => {
                if self.selected_row < self.models.len() {
                    self.selected_row += 1;
                }
                KeyOutcome::None
            }
            KeyCode::Enter => {
                match self.selected_model().map(|m| m.id) {
                    Some(id) => self.set_view(ViewMode::SingleModel(id)),
                    None => self.set_view(ViewMode::Aggregated),
                }
                if self.view_dirty {
                    KeyOutcome::ViewChanged
                } else {
                    KeyOutcome::None
                }
            }
            KeyCode::Char('a') => {
                self.selected_row = 0;
                self.set_view(ViewMode::Aggregated);
                if self.view_dirty {
                    KeyOutcome::ViewChanged
                } else {
                    KeyOutcome::None
                }
            }
            KeyCode::Char('1') => {
                self.tab = DetailTab::Positions;
                KeyOutcome::None
            }
            KeyCode::Char('2') => {
                self.tab = DetailTab::Trades;
                KeyOutcome::None
            }
            KeyCode::Char('3') => {
                self.tab = DetailTab::Conversations;
                KeyOutcome::None
            }
            KeyCode::Char('m') => {
                self.display_mode = self.display_mode.toggled();
                KeyOutcome::None
            }
            KeyCode::Char('t') => {
                self.time_range = self.time_range.next();
                self.view_dirty = true;
                KeyOutcome::ViewChanged
            }
            KeyCode::Char('r') => KeyOutcome::Action(UiAction::Refresh),
            KeyCode::Char('n') => {
                self.provider_model_hints.clear();
                self.modal = Some(Modal::AddModel(FormState::new(vec![
                    FormField::new("Name"),
                    FormField::new("Provider ID"),
                    FormField::new("Model identifier"),
                    FormField::new("Initial capital"),
                ])));
                KeyOutcome::None
            }
            KeyCode::Char('p') => {
                self.modal = Some(Modal::AddProvider(FormState::new(vec![
                    FormField::new("Name"),
                    FormField::new("API URL"),
                    FormField::masked("API key"),
                    FormField::new("Models (comma-separated)"),
                ])));
                KeyOutcome::Action(UiAction::LoadProviders)
            }
            KeyCode::Char('s') => {
                self.modal = Some(Modal::Settings(self.settings_form()));
                KeyOutcome::Action(UiAction::LoadSettings)
            }
            KeyCode::Char('d') => match self.selected_model().map(|m| m.id) {
                Some(id) => KeyOutcome::Action(UiAction::Submit(PendingAction::DeleteModel(id))),
                None => KeyOutcome::None,
            },
            KeyCode::Char('u') => KeyOutcome::Action(UiAction::CheckUpdate),
            KeyCode::Char('v') => {
                if self.update_banner_visible() {
                    self.modal = Some(Modal::Update);
                }
                KeyOutcome::None
            }
            _ => KeyOutcome::None,
        }
    }

    fn settings_form(&self) -> FormState {
        let mut form = FormState::new(vec![
            FormField::new("Trading frequency (minutes)"),
            FormField::new("Trading fee rate"),
            FormField::new("Data source priority"),
            FormField::masked("New password (optional)"),
            FormField::masked("Old password"),
        ]);
        if let Some(settings) = &self.settings {
            form.fields[0].value = settings.trading_frequency_minutes.to_string();
            form.fields[1].value = settings.trading_fee_rate.to_string();
            form.fields[2].value = settings.data_source_priority.clone().unwrap_or_default();
        }
        form
    }

    /// Prefill the open settings modal when the fetch lands after it opened.
    pub fn refresh_settings_form(&mut self) {
        if matches!(self.modal, Some(Modal::Settings(_))) {
            self.modal = Some(Modal::Settings(self.settings_form()));
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent) -> KeyOutcome {
        let Some(modal) = self.modal.take() else {
            return KeyOutcome::None;
        };

        match modal {
            Modal::Alert(msg) => match key.code {
                KeyCode::Esc | KeyCode::Enter => KeyOutcome::None,
                _ => {
                    self.modal = Some(Modal::Alert(msg));
                    KeyOutcome::None
                }
            },
            Modal::Update => match key.code {
                KeyCode::Enter => {
                    // Dismiss for 24 hours, persisted like the browser's
                    // localStorage flag.
                    self.config.dismiss_update();
                    if let Ok(path) = crate::config::get_config_path() {
                        let _ = self.config.save(&path);
                    }
                    KeyOutcome::None
                }
                KeyCode::Esc => KeyOutcome::None,
                _ => {
                    self.modal = Some(Modal::Update);
                    KeyOutcome::None
                }
            },
            Modal::Password(form) => self.handle_password_key(form, key),
            Modal::AddModel(form) => self.handle_add_model_key(form, key),
            Modal::AddProvider(form) => self.handle_add_provider_key(form, key),
            Modal::Settings(form) => self.handle_settings_key(form, key),
        }
    }

    fn handle_password_key(&mut self, mut form: FormState, key: KeyEvent) -> KeyOutcome {
        match key.code {
            // Cancel: drop the pending action, no request goes out.
            KeyCode::Esc => {
                self.pending_action = None;
                KeyOutcome::None
            }
            KeyCode::Enter => {
                let password = form.value(0).to_string();
                match self.pending_action.take() {
                    Some(action) => {
                        KeyOutcome::Action(UiAction::ResolvePassword { action, password })
                    }
                    None => KeyOutcome::None,
                }
            }
            _ => {
                Self::edit_field(&mut form, key);
                self.modal = Some(Modal::Password(form));
                KeyOutcome::None
            }
        }
    }

    fn handle_add_model_key(&mut self, mut form: FormState, key: KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Esc => KeyOutcome::None,
            KeyCode::Enter if form.focus == 1 => {
                // Enter on the provider field looks up its model list.
                let outcome = match form
                    .value(1)
                    .parse::<i64>()
                    .ok()
                    .and_then(|id| self.providers.iter().find(|p| p.id == id))
                {
                    Some(provider) => KeyOutcome::Action(UiAction::FetchProviderModels {
                        api_url: provider.api_url.clone(),
                        api_key: provider.api_key.clone(),
                    }),
                    None => KeyOutcome::None,
                };
                form.focus += 1;
                self.modal = Some(Modal::AddModel(form));
                outcome
            }
            KeyCode::Enter if form.focus + 1 < form.fields.len() => {
                form.focus += 1;
                self.modal = Some(Modal::AddModel(form));
                KeyOutcome::None
            }
            KeyCode::Enter => match self.build_new_model(&form) {
                Ok(model) => KeyOutcome::Action(UiAction::Submit(PendingAction::CreateModel(model))),
                Err(msg) => {
                    self.modal = Some(Modal::Alert(msg));
                    KeyOutcome::None
                }
            },
            _ => {
                Self::edit_field(&mut form, key);
                self.modal = Some(Modal::AddModel(form));
                KeyOutcome::None
            }
        }
    }

    fn build_new_model(&self, form: &FormState) -> Result<NewModel, String> {
        let name = form.value(0).trim().to_string();
        let model_name = form.value(2).trim().to_string();
        if name.is_empty() || model_name.is_empty() {
            return Err("Name and model identifier are required".to_string());
        }
        let provider_id = form
            .value(1)
            .trim()
            .parse::<i64>()
            .map_err(|_| "Provider ID must be a number".to_string())?;
        let initial_capital = match form.value(3).trim() {
            "" => DEFAULT_INITIAL_CAPITAL,
            raw => raw
                .parse::<f64>()
                .map_err(|_| "Initial capital must be a number".to_string())?,
        };
        Ok(NewModel {
            provider_id,
            model_name,
            name,
            initial_capital,
            password: String::new(),
        })
    }

    fn handle_add_provider_key(&mut self, mut form: FormState, key: KeyEvent) -> KeyOutcome {
        // Focus positions past the fields land on existing-provider rows.
        let field_count = form.fields.len();
        let on_list = form.focus >= field_count;
        match key.code {
            KeyCode::Esc => KeyOutcome::None,
            KeyCode::Down | KeyCode::Tab => {
                if form.focus + 1 < field_count + self.providers.len() {
                    form.focus += 1;
                }
                self.modal = Some(Modal::AddProvider(form));
                KeyOutcome::None
            }
            KeyCode::Up | KeyCode::BackTab => {
                form.focus = form.focus.saturating_sub(1);
                self.modal = Some(Modal::AddProvider(form));
                KeyOutcome::None
            }
            KeyCode::Char('x') if on_list => {
                let outcome = match self.providers.get(form.focus - field_count) {
                    Some(provider) => KeyOutcome::Action(UiAction::Submit(
                        PendingAction::DeleteProvider(provider.id),
                    )),
                    None => KeyOutcome::None,
                };
                self.modal = Some(Modal::AddProvider(form));
                outcome
            }
            KeyCode::Char('t') if on_list => {
                let outcome = match self.providers.get(form.focus - field_count) {
                    Some(provider) => {
                        let model_name = provider
                            .model_list()
                            .into_iter()
                            .next()
                            .unwrap_or_default();
                        KeyOutcome::Action(UiAction::TestProvider {
                            provider_id: provider.id,
                            model_name,
                            label: provider.name.clone(),
                        })
                    }
                    None => KeyOutcome::None,
                };
                self.modal = Some(Modal::AddProvider(form));
                outcome
            }
            KeyCode::Enter if !on_list && form.focus + 1 < field_count => {
                form.focus += 1;
                self.modal = Some(Modal::AddProvider(form));
                KeyOutcome::None
            }
            KeyCode::Enter if !on_list => match Self::build_new_provider(&form) {
                Ok(provider) => {
                    KeyOutcome::Action(UiAction::Submit(PendingAction::CreateProvider(provider)))
                }
                Err(msg) => {
                    self.modal = Some(Modal::Alert(msg));
                    KeyOutcome::None
                }
            },
            _ if on_list => {
                self.modal = Some(Modal::AddProvider(form));
                KeyOutcome::None
            }
            _ => {
                Self::edit_field(&mut form, key);
                self.modal = Some(Modal::AddProvider(form));
                KeyOutcome::None
            }
        }
    }

    fn build_new_provider(form: &FormState) -> Result<NewProvider, String> {
        let name = form.value(0).trim().to_string();
        let api_url = form.value(1).trim().to_string();
        if name.is_empty() || api_url.is_empty() {
            return Err("Name and API URL are required".to_string());
        }
        Ok(NewProvider {
            name,
            api_url,
            api_key: form.value(2).trim().to_string(),
            models: form.value(3).trim().to_string(),
            password: String::new(),
        })
    }

    fn handle_settings_key(&mut self, mut form: FormState, key: KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Esc => KeyOutcome::None,
            KeyCode::Enter if form.focus + 1 < form.fields.len() => {
                form.focus += 1;
                self.modal = Some(Modal::Settings(form));
                KeyOutcome::None
            }
            KeyCode::Enter => match Self::build_settings_update(&form) {
                Ok(settings) => {
                    let new_password = form.value(3).trim().to_string();
                    if !new_password.is_empty() {
                        let old_password = form.value(4).to_string();
                        return KeyOutcome::Action(UiAction::SetPassword {
                            old_password,
                            new_password,
                        });
                    }
                    KeyOutcome::Action(UiAction::Submit(PendingAction::SaveSettings(settings)))
                }
                Err(msg) => {
                    self.modal = Some(Modal::Alert(msg));
                    KeyOutcome::None
                }
            },
            _ => {
                Self::edit_field(&mut form, key);
                self.modal = Some(Modal::Settings(form));
                KeyOutcome::None
            }
        }
    }

    fn build_settings_update(form: &FormState) -> Result<SettingsUpdate, String> {
        let trading_frequency_minutes = form
            .value(0)
            .trim()
            .parse::<u32>()
            .map_err(|_| "Trading frequency must be a whole number".to_string())?;
        let trading_fee_rate = form
            .value(1)
            .trim()
            .parse::<f64>()
            .map_err(|_| "Fee rate must be a number".to_string())?;
        Ok(SettingsUpdate {
            trading_frequency_minutes,
            trading_fee_rate,
            data_source_priority: form.value(2).trim().to_string(),
            password: String::new(),
        })
    }

    fn edit_field(form: &mut FormState, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => {
                if let Some(field) = form.focused_field_mut() {
                    field.value.push(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = form.focused_field_mut() {
                    field.value.pop();
                }
            }
            KeyCode::Down | KeyCode::Tab => {
                if form.focus + 1 < form.fields.len() {
                    form.focus += 1;
                }
            }
            KeyCode::Up | KeyCode::BackTab => {
                form.focus = form.focus.saturating_sub(1);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state() -> DashboardState {
        DashboardState::new(
            Environment::Local,
            Instant::now(),
            TimeRange::Hour1,
            true,
            Config::default(),
        )
    }

    fn sample_model(id: i64) -> Model {
        Model {
            id,
            name: format!("model-{}", id),
            provider_id: 1,
            model_name: "gpt-4o".to_string(),
            initial_capital: None,
        }
    }

    #[test]
    fn test_enter_on_model_row_switches_view() {
        let mut state = state();
        state.models = vec![sample_model(5), sample_model(8)];

        state.selected_row = 2;
        let outcome = state.handle_key(press(KeyCode::Enter));
        assert_eq!(outcome, KeyOutcome::ViewChanged);
        assert_eq!(state.view, ViewMode::SingleModel(8));

        // Row 0 is the aggregated entry.
        state.selected_row = 0;
        let outcome = state.handle_key(press(KeyCode::Enter));
        assert_eq!(outcome, KeyOutcome::ViewChanged);
        assert_eq!(state.view, ViewMode::Aggregated);
    }

    #[test]
    fn test_time_range_key_marks_view_dirty() {
        let mut state = state();
        let outcome = state.handle_key(press(KeyCode::Char('t')));
        assert_eq!(outcome, KeyOutcome::ViewChanged);
        assert_eq!(state.time_range, TimeRange::Hour6);
        assert!(state.take_view_dirty());
        assert!(!state.take_view_dirty());
    }

    #[test]
    fn test_password_cancel_is_a_no_op() {
        let mut state = state();
        state.pending_action = Some(PendingAction::DeleteModel(3));
        state.modal = Some(Modal::Password(FormState::new(vec![FormField::masked(
            "Password",
        )])));

        let outcome = state.handle_key(press(KeyCode::Esc));
        // No action leaves the UI and the slot is cleared.
        assert_eq!(outcome, KeyOutcome::None);
        assert!(state.pending_action.is_none());
        assert!(state.modal.is_none());
    }

    #[test]
    fn test_password_submit_resolves_pending_action() {
        let mut state = state();
        state.pending_action = Some(PendingAction::DeleteModel(3));
        let mut form = FormState::new(vec![FormField::masked("Password")]);
        form.fields[0].value = "hunter2".to_string();
        state.modal = Some(Modal::Password(form));

        let outcome = state.handle_key(press(KeyCode::Enter));
        assert_eq!(
            outcome,
            KeyOutcome::Action(UiAction::ResolvePassword {
                action: PendingAction::DeleteModel(3),
                password: "hunter2".to_string(),
            })
        );
        assert!(state.pending_action.is_none());
    }

    #[test]
    fn test_add_model_form_validates_numbers() {
        let mut state = state();
        state.handle_key(press(KeyCode::Char('n')));

        // Fill: name, provider id ("abc" - invalid), model id, capital.
        let Some(Modal::AddModel(form)) = &mut state.modal else {
            panic!("expected add-model modal");
        };
        form.fields[0].value = "Scalper".to_string();
        form.fields[1].value = "abc".to_string();
        form.fields[2].value = "gpt-4o".to_string();
        form.focus = 3;

        let outcome = state.handle_key(press(KeyCode::Enter));
        assert_eq!(outcome, KeyOutcome::None);
        assert!(matches!(state.modal, Some(Modal::Alert(_))));
    }

    #[test]
    fn test_delete_key_requires_model_selection() {
        let mut state = state();
        state.models = vec![sample_model(4)];

        state.selected_row = 0;
        assert_eq!(state.handle_key(press(KeyCode::Char('d'))), KeyOutcome::None);

        state.selected_row = 1;
        assert_eq!(
            state.handle_key(press(KeyCode::Char('d'))),
            KeyOutcome::Action(UiAction::Submit(PendingAction::DeleteModel(4)))
        );
    }

    #[test]
    fn test_quit_keys_only_apply_outside_modals() {
        let mut state = state();
        assert_eq!(state.handle_key(press(KeyCode::Char('q'))), KeyOutcome::Quit);

        state.modal = Some(Modal::Alert("boom".to_string()));
        assert_eq!(state.handle_key(press(KeyCode::Esc)), KeyOutcome::None);
        assert!(state.modal.is_none());
    }
}
