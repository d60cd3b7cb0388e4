//! Shared test helpers for session tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use playground_core::assistant::*;
use playground_core::error::AssistantError;
use playground_core::message::Role;

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateAssistant { instructions: String, model: String },
    CreateThread,
    AddMessage { thread: String, content: String },
    CreateRun,
    RetrieveRun,
    ListMessages,
}

struct State {
    calls: Vec<Call>,
    statuses: VecDeque<RunStatus>,
    reply: String,
    no_messages: bool,
    fail_assistants: bool,
    fail_threads: bool,
    fail_add_message: bool,
    assistants: usize,
    threads: usize,
    runs: usize,
}

/// A backend that hands out sequential ids and plays back scripted run
/// statuses. When the status script runs out every run reports `completed`.
pub struct ScriptedBackend {
    state: Mutex<State>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                calls: Vec::new(),
                statuses: VecDeque::new(),
                reply: "Hello from the assistant".into(),
                no_messages: false,
                fail_assistants: false,
                fail_threads: false,
                fail_add_message: false,
                assistants: 0,
                threads: 0,
                runs: 0,
            }),
        }
    }

    pub fn with_statuses(self, statuses: Vec<RunStatus>) -> Self {
        self.state.lock().unwrap().statuses = statuses.into();
        self
    }

    pub fn with_reply(self, reply: &str) -> Self {
        self.state.lock().unwrap().reply = reply.into();
        self
    }

    pub fn with_no_messages(self) -> Self {
        self.state.lock().unwrap().no_messages = true;
        self
    }

    pub fn failing_add_message(self) -> Self {
        self.state.lock().unwrap().fail_add_message = true;
        self
    }

    pub fn set_fail_assistants(&self, fail: bool) {
        self.state.lock().unwrap().fail_assistants = fail;
    }

    pub fn set_fail_threads(&self, fail: bool) {
        self.state.lock().unwrap().fail_threads = fail;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| predicate(c))
            .count()
    }
}

#[async_trait]
impl AssistantBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn create_assistant(&self, spec: &AssistantSpec) -> Result<AssistantId, AssistantError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::CreateAssistant {
            instructions: spec.instructions.clone(),
            model: spec.model.clone(),
        });
        if state.fail_assistants {
            return Err(AssistantError::ApiError {
                status_code: 500,
                message: "assistant creation unavailable".into(),
            });
        }
        state.assistants += 1;
        Ok(AssistantId(format!("asst_{}", state.assistants)))
    }

    async fn create_thread(&self) -> Result<ThreadId, AssistantError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::CreateThread);
        if state.fail_threads {
            return Err(AssistantError::Network("thread creation unavailable".into()));
        }
        state.threads += 1;
        Ok(ThreadId(format!("thread_{}", state.threads)))
    }

    async fn add_message(
        &self,
        thread_id: &ThreadId,
        _role: Role,
        content: &str,
    ) -> Result<(), AssistantError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::AddMessage {
            thread: thread_id.to_string(),
            content: content.into(),
        });
        if state.fail_add_message {
            return Err(AssistantError::Network("connection reset".into()));
        }
        Ok(())
    }

    async fn create_run(
        &self,
        _thread_id: &ThreadId,
        _assistant_id: &AssistantId,
    ) -> Result<RunId, AssistantError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::CreateRun);
        state.runs += 1;
        Ok(RunId(format!("run_{}", state.runs)))
    }

    async fn retrieve_run(
        &self,
        _thread_id: &ThreadId,
        _run_id: &RunId,
    ) -> Result<RunStatus, AssistantError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::RetrieveRun);
        Ok(state.statuses.pop_front().unwrap_or(RunStatus::Completed))
    }

    async fn list_messages(
        &self,
        _thread_id: &ThreadId,
    ) -> Result<Vec<ThreadMessage>, AssistantError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::ListMessages);
        if state.no_messages {
            return Ok(Vec::new());
        }
        Ok(vec![ThreadMessage {
            id: format!("msg_{}", state.runs),
            role: Role::Assistant,
            text: vec![state.reply.clone()],
        }])
    }
}
