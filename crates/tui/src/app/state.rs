use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    KeyField,
    Buttons,
}

pub struct App {
    pub should_quit: bool,
    pub config: Config,
    pub key_field: KeyField,
    pub is_loading: bool,
    pub last_response: Option<CommandOutcome>,
    pub history: VecDeque<HistoryEntry>,
    pub focus: Focus,
    pub selected_button: usize,
    pub show_help: bool,
    pub layout: LayoutState,
    pub keybinds: Keybinds,
    pub loading_command: Option<Command>,
    pub loading_start_time: Option<Instant>,
    pub spinner_tick: usize,
    pub last_error: Option<String>,
    pub(crate) transport: Arc<dyn CommandTransport>,
    pub(crate) key_store: Box<dyn KeyStore>,
    pub(crate) app_async_tx: mpsc::UnboundedSender<AppAsyncEvent>,
    pub(crate) app_async_rx: mpsc::UnboundedReceiver<AppAsyncEvent>,
}

impl App {
    pub fn new(
        config: Config,
        transport: Arc<dyn CommandTransport>,
        key_store: Box<dyn KeyStore>,
    ) -> Self {
        let (app_async_tx, app_async_rx) = mpsc::unbounded_channel();

        Self {
            should_quit: false,
            config,
            key_field: KeyField::default(),
            is_loading: false,
            last_response: None,
            history: VecDeque::new(),
            focus: Focus::KeyField,
            selected_button: 0,
            show_help: false,
            layout: LayoutState::default(),
            keybinds: Keybinds,
            loading_command: None,
            loading_start_time: None,
            spinner_tick: 0,
            last_error: None,
            transport,
            key_store,
            app_async_tx,
            app_async_rx,
        }
    }

    pub fn api_key(&self) -> &str {
        self.key_field.value()
    }

    pub fn is_showing_api_key(&self) -> bool {
        self.key_field.is_showing()
    }
}
