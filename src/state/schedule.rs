/// Cancellable scheduled tasks
///
/// Timers themselves run as iced `Task`s (a tokio sleep). The scheduler only
/// hands out tickets and decides whether a completed sleep still counts: a
/// newer ticket of the same kind supersedes older ones, and cancelled
/// tickets fire as no-ops. Tearing a controller down is just `cancel_all`.
use std::collections::HashMap;
use std::time::Duration;

/// Delay before a resize recomputation runs once movement has settled
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(100);

/// Delay before the post-drag click suppression is lifted
pub const DRAG_CLEANUP_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    ResizeSettle,
    DragCleanup,
}

/// Handle for one scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub kind: TaskKind,
    pub delay: Duration,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    next_generation: u64,
    pending: HashMap<TaskKind, u64>,
}

impl Scheduler {
    /// Issue a ticket for `kind`, superseding any outstanding one
    pub fn schedule(&mut self, kind: TaskKind, delay: Duration) -> Ticket {
        self.next_generation += 1;
        self.pending.insert(kind, self.next_generation);

        Ticket {
            kind,
            delay,
            generation: self.next_generation,
        }
    }

    /// True if `ticket` is still current; the ticket is consumed
    pub fn fire(&mut self, ticket: Ticket) -> bool {
        match self.pending.get(&ticket.kind) {
            Some(&generation) if generation == ticket.generation => {
                self.pending.remove(&ticket.kind);
                true
            }
            _ => false,
        }
    }

    #[cfg(test)]
    pub fn is_pending(&self, kind: TaskKind) -> bool {
        self.pending.contains_key(&kind)
    }

    pub fn cancel(&mut self, kind: TaskKind) {
        self.pending.remove(&kind);
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_fires() {
        let mut scheduler = Scheduler::default();

        let first = scheduler.schedule(TaskKind::ResizeSettle, RESIZE_DEBOUNCE);
        let second = scheduler.schedule(TaskKind::ResizeSettle, RESIZE_DEBOUNCE);

        assert!(!scheduler.fire(first));
        assert!(scheduler.fire(second));
        // Consumed
        assert!(!scheduler.fire(second));
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut scheduler = Scheduler::default();

        let resize = scheduler.schedule(TaskKind::ResizeSettle, RESIZE_DEBOUNCE);
        let cleanup = scheduler.schedule(TaskKind::DragCleanup, DRAG_CLEANUP_DELAY);

        assert!(scheduler.fire(cleanup));
        assert!(scheduler.fire(resize));
    }

    #[test]
    fn test_cancelled_ticket_does_not_fire() {
        let mut scheduler = Scheduler::default();

        let resize = scheduler.schedule(TaskKind::ResizeSettle, RESIZE_DEBOUNCE);
        let cleanup = scheduler.schedule(TaskKind::DragCleanup, DRAG_CLEANUP_DELAY);
        scheduler.cancel(TaskKind::ResizeSettle);

        assert!(!scheduler.fire(resize));
        assert!(scheduler.is_pending(TaskKind::DragCleanup));

        scheduler.cancel_all();
        assert!(!scheduler.fire(cleanup));
    }
}
