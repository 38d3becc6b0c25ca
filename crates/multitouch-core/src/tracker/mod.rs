//! Per-pointer gesture state machine.
//!
//! Every active pointer owns zero or more [`TrackingRecord`]s, one per bound
//! target it went down on. Records are created on start, classified on move
//! and removed on end or cancel:
//!
//! - tap: valid from the start, invalidated once the pointer travels further
//!   than `min_scroll`, fired on end if still valid and still over its target
//! - scroll: armed once the pointer travels further than `min_scroll`, then
//!   emits incremental deltas on every move; reports a cancel with the total
//!   displacement when the host interrupts it
//!
//! The state machine never fails. Events for unknown pointers, events without
//! a target and events that match no binding are ignored.

mod record;
mod table;
#[cfg(test)]
mod tests;

pub use record::{Origin, TrackingRecord};
pub use table::PointerRecords;

use crate::binding::{BindingRegistry, GestureKind};
use crate::config::{ConfigError, GestureConfig};
use crate::dispatch::{
    callback_addr, GestureCallback, GestureDispatcher, GestureEvent, GestureEventKind,
};
use crate::input::{PointerId, PointerInput, PointerPhase, PointerSource, WheelInput};
use crate::target::{resolve_live, resolve_target, GestureTarget};
use smallvec::SmallVec;
use std::time::Duration;
use table::TrackingTable;

/// How a given input source is classified.
///
/// Touch targets are fixed for the whole touch by the host, so re-checking
/// them on move is cheap and catches retargeted contacts. The mouse target
/// follows the cursor, so re-checking it would end a drag as soon as the
/// cursor leaves the element; mouse drags also have no ceiling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourcePolicy {
    pub revalidate_target_on_move: bool,
    pub apply_ceiling: bool,
}

impl SourcePolicy {
    pub const TOUCH: SourcePolicy = SourcePolicy {
        revalidate_target_on_move: true,
        apply_ceiling: true,
    };

    pub const MOUSE: SourcePolicy = SourcePolicy {
        revalidate_target_on_move: false,
        apply_ceiling: false,
    };

    pub fn for_source(source: PointerSource) -> Self {
        match source {
            PointerSource::Touch => Self::TOUCH,
            PointerSource::Mouse => Self::MOUSE,
        }
    }
}

/// Classifies pointer streams into tap and scroll gestures.
pub struct GestureTracker<E> {
    config: GestureConfig,
    bindings: BindingRegistry<E>,
    table: TrackingTable<E>,
}

impl<E: GestureTarget> GestureTracker<E> {
    pub fn new(config: GestureConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            bindings: BindingRegistry::new(),
            table: TrackingTable::new(),
        })
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn bindings(&self) -> &BindingRegistry<E> {
        &self.bindings
    }

    pub fn add_tap(&mut self, selector: impl Into<String>, callback: GestureCallback<E>) -> bool {
        self.bindings.add_tap(selector, callback)
    }

    pub fn add_scroll(
        &mut self,
        selector: impl Into<String>,
        callback: GestureCallback<E>,
    ) -> bool {
        self.bindings.add_scroll(selector, callback)
    }

    /// Records currently held for `pointer`.
    pub fn records(&self, pointer: PointerId) -> &[TrackingRecord<E>] {
        self.table
            .get(pointer)
            .map(|records| records.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_tracking(&self, pointer: PointerId) -> bool {
        self.table.has(pointer)
    }

    pub fn tracked_pointer_count(&self) -> usize {
        self.table.pointer_count()
    }

    pub fn record_count(&self) -> usize {
        self.table.record_count()
    }

    pub fn is_idle(&self) -> bool {
        self.table.is_empty()
    }

    /// Feeds one host event through the state machine.
    ///
    /// Callback invocations are appended to `out`, never run here.
    pub fn handle(&mut self, input: &PointerInput<E>, out: &mut GestureDispatcher<E>) {
        if self.config.touch_only && input.source == PointerSource::Mouse {
            return;
        }
        if let Some(stale_after) = self.config.stale_after {
            self.evict_expired(input.timestamp, stale_after);
        }

        match input.phase {
            PointerPhase::Start => self.pointer_start(input),
            PointerPhase::Move => self.pointer_move(input, out),
            PointerPhase::End => self.pointer_end(input, out),
            PointerPhase::Cancel => self.pointer_cancel(input, out),
        }
    }

    /// Turns a wheel event over bound scroll regions into scroll steps.
    ///
    /// Wheel scrolling is stateless: no record is created and the delta is
    /// the host's wheel delta. Every scroll callback bound over the element
    /// gets one step per target it resolves to.
    pub fn handle_wheel(&mut self, input: &WheelInput<E>, out: &mut GestureDispatcher<E>) {
        if !self.config.wheel_scroll {
            return;
        }
        let Some(element) = input.target.as_ref() else {
            return;
        };

        let mut claimed: SmallVec<[(E, usize); 2]> = SmallVec::new();
        for binding in self.bindings.iter() {
            if binding.kind() != GestureKind::Scroll {
                continue;
            }
            let Some(target) = resolve_target(element, binding.selector()) else {
                continue;
            };
            let callback = callback_addr(binding.callback());
            if claimed
                .iter()
                .any(|(seen, seen_callback)| *seen == target && *seen_callback == callback)
            {
                continue;
            }
            claimed.push((target.clone(), callback));
            out.push(
                binding.callback().clone(),
                GestureEvent {
                    kind: GestureEventKind::Scroll,
                    target,
                    pointer: PointerId::MOUSE,
                    source: PointerSource::Mouse,
                    delta: Some(input.delta),
                    position: input.position,
                    origin: input.position,
                    timestamp: input.timestamp,
                },
            );
        }
    }

    /// Drops records whose pointer has been silent for longer than the
    /// configured `stale_after`, measured at `now`. Returns how many records
    /// were dropped. Does nothing when no timeout is configured.
    pub fn evict_stale(&mut self, now: Duration) -> usize {
        match self.config.stale_after {
            Some(stale_after) => self.evict_expired(now, stale_after),
            None => 0,
        }
    }

    fn evict_expired(&mut self, now: Duration, stale_after: Duration) -> usize {
        match now.checked_sub(stale_after) {
            Some(cutoff) => self.table.evict_older_than(cutoff),
            None => 0,
        }
    }

    fn pointer_start(&mut self, input: &PointerInput<E>) {
        let Some(element) = input.target.as_ref() else {
            log::trace!("start without an element target ignored");
            return;
        };

        for binding in self.bindings.iter() {
            let Some(target) = resolve_target(element, binding.selector()) else {
                continue;
            };
            for contact in &input.contacts {
                let records = self.table.entry(contact.id);
                let existing = records
                    .iter()
                    .position(|record| record.kind == binding.kind() && record.target == target);
                match existing {
                    Some(index) => {
                        let record = &mut records[index];
                        log::debug!("re-armed {} on {} for {}", record.kind, record.selector, contact.id);
                        record.rearm(target.clone(), input.timestamp);
                    }
                    None => {
                        log::debug!(
                            "tracking {} on {} for {}",
                            binding.kind(),
                            binding.selector(),
                            contact.id
                        );
                        records.push(TrackingRecord::new(
                            contact.id,
                            binding.kind(),
                            target.clone(),
                            binding.selector(),
                            binding.callback().clone(),
                            Origin {
                                position: contact.position,
                                timestamp: input.timestamp,
                            },
                        ));
                    }
                }
            }
        }
    }

    fn pointer_move(&mut self, input: &PointerInput<E>, out: &mut GestureDispatcher<E>) {
        let policy = SourcePolicy::for_source(input.source);
        let min_scroll = self.config.min_scroll;
        let max_scroll = self.config.max_scroll;

        for contact in &input.contacts {
            let Some(records) = self.table.get_mut(contact.id) else {
                continue;
            };
            for record in records.iter_mut() {
                record.last_seen = input.timestamp;
                if policy.revalidate_target_on_move
                    && resolve_live(input.target.as_ref(), &record.selector).as_ref()
                        != Some(&record.target)
                {
                    log::trace!("{} left {}; move ignored", contact.id, record.selector);
                    continue;
                }

                let displacement = contact.position.chebyshev_distance(record.origin.position);
                match record.kind {
                    GestureKind::Scroll => {
                        let within_ceiling = !policy.apply_ceiling || displacement < max_scroll;
                        if record.valid && within_ceiling {
                            let delta = contact.position - record.last_emitted;
                            record.last_emitted = contact.position;
                            out.push(
                                record.callback.clone(),
                                GestureEvent {
                                    kind: GestureEventKind::Scroll,
                                    target: record.target.clone(),
                                    pointer: contact.id,
                                    source: input.source,
                                    delta: Some(delta),
                                    position: contact.position,
                                    origin: record.origin.position,
                                    timestamp: input.timestamp,
                                },
                            );
                        } else if displacement > min_scroll {
                            if !record.valid {
                                log::debug!("scroll armed on {} for {}", record.selector, contact.id);
                            }
                            record.valid = true;
                            record.last_emitted = contact.position;
                        }
                    }
                    GestureKind::Tap => {
                        if record.valid && displacement > min_scroll {
                            log::debug!("tap on {} cancelled by movement of {}", record.selector, contact.id);
                            record.valid = false;
                        }
                    }
                }
            }
        }
    }

    fn pointer_end(&mut self, input: &PointerInput<E>, out: &mut GestureDispatcher<E>) {
        for contact in &input.contacts {
            let Some(records) = self.table.remove(contact.id) else {
                continue;
            };
            for record in records {
                match record.kind {
                    GestureKind::Scroll => {
                        log::trace!("scroll on {} ended for {}", record.selector, contact.id);
                    }
                    GestureKind::Tap => {
                        let live = resolve_live(input.target.as_ref(), &record.selector);
                        if record.valid && live.as_ref() == Some(&record.target) {
                            out.push(
                                record.callback,
                                GestureEvent {
                                    kind: GestureEventKind::Tap,
                                    target: record.target,
                                    pointer: contact.id,
                                    source: input.source,
                                    delta: None,
                                    position: contact.position,
                                    origin: record.origin.position,
                                    timestamp: input.timestamp,
                                },
                            );
                        } else {
                            log::trace!("tap on {} suppressed for {}", record.selector, contact.id);
                        }
                    }
                }
            }
        }
    }

    fn pointer_cancel(&mut self, input: &PointerInput<E>, out: &mut GestureDispatcher<E>) {
        for contact in &input.contacts {
            let Some(records) = self.table.remove(contact.id) else {
                continue;
            };
            for record in records {
                if record.kind != GestureKind::Scroll {
                    continue;
                }
                out.push(
                    record.callback,
                    GestureEvent {
                        kind: GestureEventKind::ScrollCancel,
                        target: record.target,
                        pointer: contact.id,
                        source: input.source,
                        delta: Some(contact.position - record.origin.position),
                        position: record.origin.position,
                        origin: record.origin.position,
                        timestamp: input.timestamp,
                    },
                );
            }
        }
    }
}

impl<E: std::fmt::Debug> std::fmt::Debug for GestureTracker<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureTracker")
            .field("config", &self.config)
            .field("bindings", &self.bindings)
            .field("tracked_pointers", &self.table.pointer_count())
            .finish()
    }
}
