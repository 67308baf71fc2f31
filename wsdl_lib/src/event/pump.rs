use std::mem::MaybeUninit;
use std::ops::Deref;
use std::sync::Arc;
use sdl3::sys::events::{SDL_Event, SDL_PollEvent, SDL_PushEvent};
use tracing::trace;
use crate::context::{Context, OwnerThread};
use crate::error::{WsdlError, WsdlResult};
use crate::registry::WindowRegistry;
use super::{decode, tag, Event};

/// Non-blocking access to the SDL event queue
///
/// Only one pump can exist at a time and it must be used on the thread that created the
/// `Context`. Window events are folded into the registered window's state as they are polled.
pub struct EventPump {
    pump: sdl3::EventPump,
    registry: Arc<WindowRegistry>,
    owner: OwnerThread,
}

impl EventPump {
    pub(crate) fn new(context: &Context) -> WsdlResult<EventPump> {
        let pump = context
            .sdl()
            .event_pump()
            .map_err(|e| WsdlError::Init(e.to_string()))?;

        Ok(EventPump {
            pump,
            registry: Arc::clone(context.registry()),
            owner: context.owner(),
        })
    }

    /// Take one record off the queue without decoding it
    pub fn poll_raw(&mut self) -> Option<SDL_Event> {
        self.owner.assert_current();

        let mut raw = MaybeUninit::<SDL_Event>::uninit();

        // SAFETY: SDL_PollEvent fills the whole record when it returns true
        unsafe {
            if SDL_PollEvent(raw.as_mut_ptr()) {
                Some(raw.assume_init())
            } else {
                None
            }
        }
    }

    /// Take one record off the queue and decode it. None if the queue was empty or if the
    /// record was of a kind without a variant.
    pub fn poll(&mut self) -> Option<Event> {
        let raw = self.poll_raw()?;

        self.accept(&raw)
    }

    /// Drain the queue, skipping records without a variant
    pub fn poll_iter(&mut self) -> PollIter<'_> {
        PollIter { pump: self }
    }

    /// Put a record at the back of the queue
    pub fn push(&mut self, mut raw: SDL_Event) -> WsdlResult<()> {
        self.owner.assert_current();

        // SAFETY: SDL copies the record, the pointer only has to be valid for the call
        if unsafe { SDL_PushEvent(&mut raw) } {
            Ok(())
        } else {
            Err(WsdlError::last_native())
        }
    }

    pub fn registry(&self) -> &Arc<WindowRegistry> {
        &self.registry
    }

    fn accept(&self, raw: &SDL_Event) -> Option<Event> {
        let event = decode(raw);

        match &event {
            Some(event) => {
                self.registry.apply(event);
            }
            None => trace!("Dropped event {:#x}", tag(raw)),
        }

        event
    }
}

impl Deref for EventPump {
    type Target = sdl3::EventPump;
    fn deref(&self) -> &Self::Target {
        &self.pump
    }
}

pub struct PollIter<'a> {
    pump: &'a mut EventPump,
}

impl Iterator for PollIter<'_> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        loop {
            let raw = self.pump.poll_raw()?;

            if let Some(event) = self.pump.accept(&raw) {
                return Some(event);
            }
        }
    }
}
