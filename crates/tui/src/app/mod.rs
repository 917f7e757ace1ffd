use crate::input::KeyField;
use crate::keybinds::Keybinds;
use crate::ui::layout::LayoutState;
use crate::ui::panel::PanelType;
use crate::Config;
use fan_ctl_client::{
    Command, CommandOutcome, CommandRequest, CommandTransport, KeyStore, API_KEY_STORAGE_KEY,
};
use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

mod actions;
mod effects;
mod input;
mod render;
mod state;
mod types;

pub use state::{App, Focus};
pub use types::{AppAsyncEvent, CommandButton, HistoryEntry, HISTORY_LIMIT};

pub(super) fn redact_key(input: &str, key: &str) -> String {
    if key.is_empty() {
        return input.to_string();
    }
    input.replace(key, "[REDACTED]")
}

impl App {
    pub(super) fn report_error(&mut self, context: &str, error: impl std::fmt::Display) {
        let message = format!("{context}: {}", self.redact_sensitive(&error.to_string()));
        self.last_error = Some(message.clone());
        tracing::warn!("{message}");
    }

    pub(super) fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub(super) fn redact_sensitive(&self, input: &str) -> String {
        redact_key(input, self.api_key())
    }

    pub(super) fn spawn_app_task<F>(&self, future: F)
    where
        F: Future<Output = AppAsyncEvent> + Send + 'static,
    {
        let tx = self.app_async_tx.clone();
        tokio::spawn(async move {
            let event = future.await;
            let _ = tx.send(event);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::{App, AppAsyncEvent, Focus, HISTORY_LIMIT};
    use crate::Config;
    use fan_ctl_client::{
        ApiError, ApiResult, Command, CommandReply, CommandRequest, CommandTransport, KeyStore,
        MemoryKeyStore, StoreError, StoreResult, API_KEY_STORAGE_KEY,
    };
    use futures::future::BoxFuture;
    use ratatui::backend::TestBackend;
    use ratatui::crossterm::event::{
        Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };
    use ratatui::Terminal;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Clone)]
    enum MockReply {
        Status(i64),
        Fail(&'static str),
        Garbage,
        Pending,
        EchoKey,
    }

    #[derive(Clone)]
    struct MockTransport {
        reply: MockReply,
        calls: Arc<AtomicUsize>,
        requests: Arc<Mutex<Vec<CommandRequest>>>,
    }

    impl MockTransport {
        fn new(reply: MockReply) -> Self {
            Self {
                reply,
                calls: Arc::new(AtomicUsize::new(0)),
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl CommandTransport for MockTransport {
        fn send_command(
            &self,
            request: CommandRequest,
        ) -> BoxFuture<'static, ApiResult<CommandReply>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let echoed = format!("rejected key {}", request.key);
            self.requests.lock().expect("requests lock").push(request);
            let reply = self.reply.clone();
            Box::pin(async move {
                match reply {
                    MockReply::Status(status_code) => Ok(CommandReply {
                        status_code,
                        body: None,
                    }),
                    MockReply::Fail(description) => {
                        Err(ApiError::Transport(description.to_string()))
                    }
                    MockReply::Garbage => CommandReply::parse("<html>bad gateway</html>"),
                    MockReply::Pending => futures::future::pending().await,
                    MockReply::EchoKey => Err(ApiError::Transport(echoed)),
                }
            })
        }
    }

    struct BrokenStore;

    impl KeyStore for BrokenStore {
        fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            Err(StoreError::NoDataDir)
        }

        fn set(&mut self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::NoDataDir)
        }
    }

    fn app_with(transport: &MockTransport, store: &MemoryKeyStore) -> App {
        let mut app = App::new(
            Config::default(),
            Arc::new(transport.clone()),
            Box::new(store.clone()),
        );
        app.init();
        app
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn press_ctrl(app: &mut App, c: char) -> bool {
        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::CONTROL,
        )))
    }

    fn click(app: &mut App, column: u16, row: u16) {
        app.handle_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }));
    }

    fn stored_key(store: &MemoryKeyStore) -> Option<String> {
        store.get(API_KEY_STORAGE_KEY).expect("store get")
    }

    async fn settle(app: &mut App) {
        let event = tokio::time::timeout(Duration::from_secs(5), app.app_async_rx.recv())
            .await
            .expect("command should complete")
            .expect("async channel open");
        app.apply_async_event(event);
    }

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).expect("terminal");
        terminal.draw(|frame| app.render(frame)).expect("draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn starts_with_saved_key() {
        let store = MemoryKeyStore::with_entry(API_KEY_STORAGE_KEY, "saved-key");
        let app = app_with(&MockTransport::new(MockReply::Status(200)), &store);

        assert_eq!(app.api_key(), "saved-key");
        assert_eq!(app.focus, Focus::Buttons);
        assert!(!app.is_loading);
        assert!(app.last_response.is_none());
    }

    #[test]
    fn starts_empty_without_saved_key() {
        let transport = MockTransport::new(MockReply::Status(200));
        let app = app_with(&transport, &MemoryKeyStore::new());

        assert_eq!(app.api_key(), "");
        assert_eq!(app.focus, Focus::KeyField);
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn unreadable_store_starts_empty() {
        let mut app = App::new(
            Config::default(),
            Arc::new(MockTransport::new(MockReply::Status(200))),
            Box::new(BrokenStore),
        );
        app.init();
        assert_eq!(app.api_key(), "");
    }

    #[test]
    fn every_edit_is_written_through() {
        let store = MemoryKeyStore::new();
        let mut app = app_with(&MockTransport::new(MockReply::Status(200)), &store);

        for (c, expected) in [('a', "a"), ('b', "ab"), (' ', "ab "), ('€', "ab €")] {
            press(&mut app, KeyCode::Char(c));
            assert_eq!(app.api_key(), expected);
            assert_eq!(stored_key(&store).as_deref(), Some(expected));
        }

        press(&mut app, KeyCode::Backspace);
        assert_eq!(stored_key(&store).as_deref(), Some("ab "));

        app.handle_event(Event::Paste("xyz".to_string()));
        assert_eq!(stored_key(&store).as_deref(), Some("ab xyz"));

        press_ctrl(&mut app, 'u');
        assert_eq!(app.api_key(), "");
        assert_eq!(stored_key(&store).as_deref(), Some(""));
    }

    #[test]
    fn failed_store_write_is_reported_not_fatal() {
        let mut app = App::new(
            Config::default(),
            Arc::new(MockTransport::new(MockReply::Status(200))),
            Box::new(BrokenStore),
        );
        press(&mut app, KeyCode::Char('k'));

        assert_eq!(app.api_key(), "k");
        assert!(app
            .last_error
            .as_deref()
            .is_some_and(|e| e.starts_with("Failed to save API key")));
    }

    #[test]
    fn toggling_visibility_never_touches_the_key() {
        let store = MemoryKeyStore::with_entry(API_KEY_STORAGE_KEY, "hunter22");
        let mut app = app_with(&MockTransport::new(MockReply::Status(200)), &store);

        assert!(!app.is_showing_api_key());
        assert!(!draw(&mut app).contains("hunter22"));

        press_ctrl(&mut app, 'r');
        assert!(app.is_showing_api_key());
        assert!(draw(&mut app).contains("hunter22"));

        press_ctrl(&mut app, 'r');
        assert!(!app.is_showing_api_key());
        assert_eq!(app.api_key(), "hunter22");
        assert_eq!(stored_key(&store).as_deref(), Some("hunter22"));
    }

    #[test]
    fn clicking_lock_icon_toggles_visibility() {
        let store = MemoryKeyStore::with_entry(API_KEY_STORAGE_KEY, "hunter22");
        let mut app = app_with(&MockTransport::new(MockReply::Status(200)), &store);
        draw(&mut app);

        click(&mut app, 77, 2);
        assert!(app.is_showing_api_key());
        click(&mut app, 77, 2);
        assert!(!app.is_showing_api_key());
    }

    #[tokio::test]
    async fn accepted_command_reports_success() {
        let transport = MockTransport::new(MockReply::Status(200));
        let store = MemoryKeyStore::with_entry(API_KEY_STORAGE_KEY, "k3y");
        let mut app = app_with(&transport, &store);

        assert!(app.dispatch_command(Command::Light));
        assert!(app.is_loading);
        settle(&mut app).await;

        let response = app.last_response.as_ref().expect("response");
        assert!(!response.is_error);
        assert_eq!(response.message, "Success with message \"light\"");
        assert!(!app.is_loading);

        let requests = transport.requests.lock().expect("requests lock");
        assert_eq!(requests.as_slice(), [CommandRequest::new("k3y", Command::Light)]);
    }

    #[tokio::test]
    async fn rejected_command_echoes_status() {
        let transport = MockTransport::new(MockReply::Status(403));
        let mut app = app_with(&transport, &MemoryKeyStore::new());

        app.dispatch_command(Command::Off);
        settle(&mut app).await;

        let response = app.last_response.as_ref().expect("response");
        assert!(response.is_error);
        assert_eq!(response.message, "403: Error with message \"off\"");
    }

    #[tokio::test]
    async fn network_failure_shows_description_and_clears_loading() {
        let transport = MockTransport::new(MockReply::Fail("error sending request: connection refused"));
        let mut app = app_with(&transport, &MemoryKeyStore::new());

        app.dispatch_command(Command::Speed1);
        settle(&mut app).await;

        let response = app.last_response.as_ref().expect("response");
        assert!(response.is_error);
        assert_eq!(response.message, "error sending request: connection refused");
        assert!(!app.is_loading);
        assert!(app.command_buttons().iter().all(|b| b.enabled));
    }

    #[tokio::test]
    async fn malformed_reply_is_an_error() {
        let transport = MockTransport::new(MockReply::Garbage);
        let mut app = app_with(&transport, &MemoryKeyStore::new());

        app.dispatch_command(Command::Speed3);
        settle(&mut app).await;

        let response = app.last_response.as_ref().expect("response");
        assert!(response.is_error);
        assert!(!response.message.is_empty());
        assert!(!app.is_loading);
    }

    #[tokio::test]
    async fn failure_text_never_contains_the_key() {
        let transport = MockTransport::new(MockReply::Fail("rejected key hunter22"));
        let store = MemoryKeyStore::with_entry(API_KEY_STORAGE_KEY, "hunter22");
        let mut app = app_with(&transport, &store);

        app.dispatch_command(Command::Light);
        settle(&mut app).await;

        let response = app.last_response.as_ref().expect("response");
        assert_eq!(response.message, "rejected key [REDACTED]");
    }

    #[tokio::test]
    async fn failure_text_hides_the_dispatched_key_after_an_edit() {
        let transport = MockTransport::new(MockReply::EchoKey);
        let store = MemoryKeyStore::with_entry(API_KEY_STORAGE_KEY, "old-secret");
        let mut app = app_with(&transport, &store);

        app.dispatch_command(Command::Off);
        app.set_api_key("new-secret");
        settle(&mut app).await;

        let response = app.last_response.as_ref().expect("response");
        assert_eq!(response.message, "rejected key [REDACTED]");
        assert!(!response.message.contains("old-secret"));
    }

    #[tokio::test]
    async fn short_keys_are_still_redacted() {
        let transport = MockTransport::new(MockReply::EchoKey);
        let store = MemoryKeyStore::with_entry(API_KEY_STORAGE_KEY, "xq");
        let mut app = app_with(&transport, &store);

        app.dispatch_command(Command::Speed1);
        settle(&mut app).await;

        let response = app.last_response.as_ref().expect("response");
        assert_eq!(response.message, "rejected key [REDACTED]");
    }

    #[tokio::test]
    async fn buttons_are_disabled_while_a_request_is_in_flight() {
        let transport = MockTransport::new(MockReply::Pending);
        let mut app = app_with(&transport, &MemoryKeyStore::new());

        assert!(app.dispatch_command(Command::Speed2));
        assert!(app.command_buttons().iter().all(|b| !b.enabled));
        assert_eq!(app.command_buttons().len(), 5);

        for command in Command::ALL {
            assert!(!app.dispatch_command(command));
        }
        app.focus = Focus::Buttons;
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(transport.calls(), 1);
        assert!(app.is_loading);
    }

    #[tokio::test]
    async fn key_is_captured_at_dispatch_time() {
        let transport = MockTransport::new(MockReply::Status(200));
        let mut app = app_with(&transport, &MemoryKeyStore::new());

        app.set_api_key("first");
        app.dispatch_command(Command::Light);
        app.set_api_key("second");
        settle(&mut app).await;
        app.dispatch_command(Command::Off);
        settle(&mut app).await;

        let requests = transport.requests.lock().expect("requests lock");
        assert_eq!(requests[0].key, "first");
        assert_eq!(requests[1].key, "second");
        assert_eq!(requests[1].message, "off");
    }

    #[tokio::test]
    async fn banner_shows_spinner_instead_of_stale_message() {
        let transport = MockTransport::new(MockReply::Status(200));
        let mut app = app_with(&transport, &MemoryKeyStore::new());

        app.dispatch_command(Command::Light);
        settle(&mut app).await;
        assert!(draw(&mut app).contains("Success with message \"light\""));

        app.dispatch_command(Command::Off);
        let screen = draw(&mut app);
        assert!(screen.contains("⠋"));
        assert!(screen.contains("Commands (busy)"));
        // The activity list still has the old entry; only the banner is replaced.
        assert_eq!(screen.matches("Success with message \"light\"").count(), 1);

        settle(&mut app).await;
        let screen = draw(&mut app);
        assert!(screen.contains("Success with message \"off\""));
        assert!(!screen.contains("⠋"));
    }

    #[tokio::test]
    async fn digit_keys_and_clicks_dispatch_commands() {
        let transport = MockTransport::new(MockReply::Status(200));
        let mut app = app_with(&transport, &MemoryKeyStore::new());
        app.focus = Focus::Buttons;

        press(&mut app, KeyCode::Char('4'));
        settle(&mut app).await;
        assert_eq!(
            app.last_response.as_ref().map(|r| r.message.as_str()),
            Some("Success with message \"speed2\"")
        );

        draw(&mut app);
        click(&mut app, 5, 6);
        settle(&mut app).await;
        assert_eq!(
            app.last_response.as_ref().map(|r| r.message.as_str()),
            Some("Success with message \"off\"")
        );
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn history_is_bounded_and_newest_first() {
        let transport = MockTransport::new(MockReply::Status(200));
        let mut app = app_with(&transport, &MemoryKeyStore::new());

        for i in 0..HISTORY_LIMIT + 3 {
            let command = Command::ALL[i % Command::ALL.len()];
            app.dispatch_command(command);
            settle(&mut app).await;
        }

        assert_eq!(app.history.len(), HISTORY_LIMIT);
        let last = Command::ALL[(HISTORY_LIMIT + 2) % Command::ALL.len()];
        assert_eq!(app.history.front().map(|e| e.command), Some(last));
    }

    #[test]
    fn key_field_focus_types_digits_instead_of_dispatching() {
        let transport = MockTransport::new(MockReply::Status(200));
        let store = MemoryKeyStore::new();
        let mut app = app_with(&transport, &store);

        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.api_key(), "1");
        assert_eq!(transport.calls(), 0);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Buttons);
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        assert!(!app.should_quit);
        assert!(press_ctrl(&mut app, 'q'));
    }

    #[test]
    fn altgr_characters_reach_the_key_field() {
        let store = MemoryKeyStore::new();
        let mut app = app_with(&MockTransport::new(MockReply::Status(200)), &store);

        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('@'),
            KeyModifiers::CONTROL | KeyModifiers::ALT,
        )));
        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('x'),
            KeyModifiers::CONTROL,
        )));

        assert_eq!(app.api_key(), "@");
        assert_eq!(stored_key(&store).as_deref(), Some("@"));
    }

    #[test]
    fn completion_event_applies_without_a_runtime() {
        let transport = MockTransport::new(MockReply::Status(200));
        let mut app = app_with(&transport, &MemoryKeyStore::new());
        app.is_loading = true;

        app.apply_async_event(AppAsyncEvent::CommandFinished {
            command: Command::Speed3,
            key: String::new(),
            result: Err(ApiError::Transport("timed out".to_string())),
        });

        assert!(!app.is_loading);
        assert_eq!(
            app.last_response.as_ref().map(|r| r.message.as_str()),
            Some("timed out")
        );
    }
}
