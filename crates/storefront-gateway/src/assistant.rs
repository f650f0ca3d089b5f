//! Opaque adapter for the shop's chat assistant. The provider's
//! streaming protocol is not modelled here; a submitted message yields
//! a finite, non-restartable sequence of events through a callback and
//! that is the whole contract.

pub enum AssistantEvent {
    Token(String),
    Meta(String),
    Done,
}

pub trait AssistantService {
    fn submit_message(&self, message: &str, on_event: &dyn Fn(AssistantEvent));
}

/// Canned assistant used by the terminal shell and in tests. Emits a
/// short token stream echoing the question, then `Done`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptedAssistant;

impl AssistantService for ScriptedAssistant {
    fn submit_message(&self, message: &str, on_event: &dyn Fn(AssistantEvent)) {
        let trimmed = message.trim();
        if trimmed.is_empty() {
            on_event(AssistantEvent::Meta("empty message".to_string()));
            on_event(AssistantEvent::Done);
            return;
        }
        for token in [
            "Hello! ".to_string(),
            "You asked: ".to_string(),
            format!("\"{trimmed}\". "),
            "A store associate will follow up shortly.".to_string(),
        ] {
            on_event(AssistantEvent::Token(token));
        }
        on_event(AssistantEvent::Done);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    use super::*;

    fn collect(message: &str) -> (String, usize, bool) {
        let tokens = RefCell::new(String::new());
        let metas = RefCell::new(0usize);
        let done = RefCell::new(false);
        ScriptedAssistant.submit_message(message, &|event| match event {
            AssistantEvent::Token(token) => tokens.borrow_mut().push_str(&token),
            AssistantEvent::Meta(_) => *metas.borrow_mut() += 1,
            AssistantEvent::Done => *done.borrow_mut() = true,
        });
        (tokens.into_inner(), metas.into_inner(), done.into_inner())
    }

    #[test]
    fn every_submission_ends_with_done() {
        let (text, _, done) = collect("where is my parcel?");
        assert!(done);
        assert!(text.contains("where is my parcel?"));
    }

    #[test]
    fn empty_messages_yield_a_meta_event_and_no_tokens() {
        let (text, metas, done) = collect("   ");
        assert_eq!(text, "");
        assert_eq!(metas, 1);
        assert!(done);
    }
}
