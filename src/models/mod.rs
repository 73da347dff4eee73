pub mod event;

pub use event::{CreateEventRequest, Event, EventRow, NewEvent};
