use super::*;

impl App {
    /// Loads the saved API key. Never touches the network.
    pub fn init(&mut self) {
        match self.key_store.get(API_KEY_STORAGE_KEY) {
            Ok(Some(saved)) if !saved.is_empty() => {
                self.key_field.set_value(saved);
                self.focus = Focus::Buttons;
                tracing::info!("Loaded saved API key");
            }
            Ok(_) => {
                tracing::info!("No saved API key");
            }
            Err(e) => {
                tracing::warn!("Failed to read saved API key: {e}");
            }
        }
    }

    /// Sends `command` with the key as it is right now. Returns `false` while
    /// another command is still in flight.
    pub fn dispatch_command(&mut self, command: Command) -> bool {
        if self.is_loading {
            tracing::debug!(%command, "Ignoring command while a request is in flight");
            return false;
        }

        self.is_loading = true;
        self.loading_command = Some(command);
        self.loading_start_time = Some(Instant::now());
        self.selected_button = command.index();

        let request = CommandRequest::new(self.api_key(), command);
        let key = request.key.clone();
        tracing::info!(%command, "Dispatching fan command");

        let pending = self.transport.send_command(request);
        self.spawn_app_task(async move {
            AppAsyncEvent::CommandFinished {
                command,
                key,
                result: pending.await,
            }
        });
        true
    }

    pub fn process_async_events(&mut self) {
        let mut async_events = Vec::new();
        while let Ok(event) = self.app_async_rx.try_recv() {
            async_events.push(event);
        }

        for event in async_events {
            self.apply_async_event(event);
        }
    }

    pub fn apply_async_event(&mut self, event: AppAsyncEvent) {
        match event {
            AppAsyncEvent::CommandFinished {
                command,
                key,
                result,
            } => {
                let mut outcome = CommandOutcome::from_result(command, &result);
                match &result {
                    Ok(reply) if reply.is_success() => {
                        tracing::info!(%command, "Fan command accepted");
                    }
                    Ok(reply) => {
                        tracing::warn!(%command, status = reply.status_code, "Fan command rejected");
                    }
                    Err(e) => {
                        let scrubbed = redact_key(&outcome.message, &key);
                        outcome.message = self.redact_sensitive(&scrubbed);
                        let kind = if e.is_transport() { "transport" } else { "reply" };
                        tracing::warn!(%command, kind, "Fan command failed: {}", outcome.message);
                    }
                }

                self.is_loading = false;
                self.loading_command = None;
                self.loading_start_time = None;

                self.history.push_front(HistoryEntry {
                    command,
                    outcome: outcome.clone(),
                });
                self.history.truncate(HISTORY_LIMIT);
                self.last_response = Some(outcome);
            }
        }
    }

    pub fn on_tick(&mut self) {
        if self.is_loading {
            self.spinner_tick = self.spinner_tick.wrapping_add(1);
        }
    }
}
