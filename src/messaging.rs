//! Mutation events published by the puzzle state, and a small fan-out bus
//! for hosts with several listeners.

use std::cell::RefCell;

use crate::data::LineState;

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    #[test]
    fn delivers_messages_to_every_subscriber() {
        let bus = MessageBus::new();
        let first = Rc::new(RefCell::new(Vec::new()));
        let second = Rc::new(RefCell::new(Vec::new()));

        for sink in [Rc::clone(&first), Rc::clone(&second)] {
            bus.subscribe(move |message| sink.borrow_mut().push(message));
        }

        let message = Message::UpdateHLine {
            x: 1,
            y: 2,
            state: LineState::Line,
        };
        bus.send(message);

        assert_eq!(*first.borrow(), vec![message]);
        assert_eq!(*second.borrow(), vec![message]);
    }
}

/// One observed mutation: an edge at `(x, y)` took the given state.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Message {
    UpdateHLine {
        x: usize,
        y: usize,
        state: LineState,
    },
    UpdateVLine {
        x: usize,
        y: usize,
        state: LineState,
    },
}

/// Sink for mutation events. The solver calls `send` synchronously for every
/// edge it sets; implementations must not block, or the solve slows down
/// proportionally. A host that animates interposes its delay here.
pub trait Publisher {
    fn send(&self, message: Message);
}

/// `Publisher` that forwards every message to a list of handlers.
pub struct MessageBus {
    handlers: RefCell<Vec<Box<dyn Fn(Message)>>>,
}

impl MessageBus {
    pub fn new() -> MessageBus {
        MessageBus {
            handlers: RefCell::new(Vec::new()),
        }
    }

    pub fn subscribe(&self, handler: impl Fn(Message) + 'static) {
        self.handlers.borrow_mut().push(Box::new(handler));
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Publisher for MessageBus {
    fn send(&self, message: Message) {
        for handler in self.handlers.borrow().iter() {
            handler(message);
        }
    }
}
