use log::trace;
use std::{fmt::Debug, hash::Hash};

use super::{event::PageEvent, frames::FrameTable, observer::Observer};
use crate::{
    paging::ReplacementPolicy,
    sim::{AccessOutcome, PageReplacementResult},
};

/// Replays a reference string against a frame table, asking the policy
/// for a victim only once every frame is occupied.
pub struct PagingCore<'a, P, R> {
    pub table: FrameTable<P>,
    pub policy: R,
    references: &'a [P],
    observer: Observer,
}

impl<'a, P, R> PagingCore<'a, P, R>
where
    P: Clone + Eq + Hash + Debug,
    R: ReplacementPolicy<P>,
{
    pub fn new(references: &'a [P], frames: usize) -> Self {
        Self {
            table: FrameTable::new(frames),
            policy: R::init(frames, references),
            references,
            observer: Observer::new(),
        }
    }

    pub fn run(&mut self) -> PageReplacementResult<P> {
        let mut result = PageReplacementResult {
            total_page_faults: 0,
            total_page_hits: 0,
            final_frames_table: Vec::with_capacity(self.references.len()),
            access_outcomes: Vec::with_capacity(self.references.len()),
        };

        for (step, page) in self.references.iter().enumerate() {
            let outcome = self.access(step, page);
            match outcome {
                AccessOutcome::Hit => result.total_page_hits += 1,
                AccessOutcome::Fault => result.total_page_faults += 1,
            }
            result.access_outcomes.push(outcome);

            self.observer.observe_frames(&self.table);
            result.final_frames_table.push(self.table.snapshot());
        }

        result
    }

    fn access(&mut self, step: usize, page: &P) -> AccessOutcome {
        self.policy.touched(step, page);

        if let Some(slot) = self.table.slot_of(page) {
            self.policy.hit(step, slot, page);
            trace!("step={} {:?}", step, PageEvent::Hit { page, slot });
            return AccessOutcome::Hit;
        }

        let slot = match self.table.free_slot() {
            Some(slot) => slot,
            None => self.policy.victim(&self.table, step),
        };
        let evicted = self.table.place(slot, page.clone());
        self.policy.loaded(step, slot, page);
        trace!(
            "step={} {:?}",
            step,
            PageEvent::Fault {
                page,
                slot,
                evicted
            }
        );

        AccessOutcome::Fault
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}
