//! # Producer: keeps the work queue fed while the goal is open.
//!
//! One producer per run. It generates a candidate, then blocks on the
//! bounded queue; the full queue **is** the throttle, there is no sleep
//! loop. The enqueue races the goal's done signal, so shutdown is never
//! stuck behind a full queue.
//!
//! ## Exit conditions
//! - the goal closes (reached or forced), or
//! - the queue is closed under it.
//!
//! On exit the producer closes the queue, so idle workers observe `Closed`
//! right away instead of waiting out their next poll.

use std::sync::Arc;

use crate::candidate::Generator;
use crate::goal::GoalTracker;
use crate::queue::WorkQueue;

/// Generate-and-enqueue loop.
pub struct Producer {
    generator: Generator,
    queue: WorkQueue,
    goal: Arc<GoalTracker>,
}

impl Producer {
    /// Creates a producer feeding `queue` until `goal` closes.
    pub fn new(generator: Generator, queue: WorkQueue, goal: Arc<GoalTracker>) -> Self {
        Self {
            generator,
            queue,
            goal,
        }
    }

    /// Runs until the goal or the queue closes, then closes the queue.
    ///
    /// A candidate generated but not yet enqueued when the goal closes is
    /// simply dropped; candidates are free to make.
    pub async fn run(self) {
        loop {
            if self.goal.is_done() {
                break;
            }
            let candidate = self.generator.generate();
            tokio::select! {
                _ = self.goal.done() => break,
                sent = self.queue.push(candidate) => {
                    if !sent {
                        break;
                    }
                }
            }
        }
        self.queue.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Alphabet;
    use crate::queue::Pulled;
    use std::time::Duration;

    fn producer(queue: &WorkQueue, goal: &Arc<GoalTracker>) -> Producer {
        Producer::new(
            Generator::new(Alphabet::Digits, 5),
            queue.clone(),
            Arc::clone(goal),
        )
    }

    #[tokio::test]
    async fn test_fills_queue_to_capacity_then_parks() {
        let queue = WorkQueue::bounded(4);
        let goal = Arc::new(GoalTracker::new(10));
        let handle = tokio::spawn(producer(&queue, &goal).run());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(queue.len(), 4, "queue not filled to capacity");
        assert!(!handle.is_finished(), "producer exited while goal open");

        goal.force_done();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("producer stuck after force_done")
            .expect("producer panicked");
    }

    #[tokio::test]
    async fn test_exits_and_closes_queue_when_goal_already_done() {
        let queue = WorkQueue::bounded(4);
        let goal = Arc::new(GoalTracker::new(0));

        producer(&queue, &goal).run().await;

        assert!(queue.is_empty());
        assert_eq!(queue.pull(Duration::from_millis(10)).await, Pulled::Closed);
    }

    #[tokio::test]
    async fn test_stops_when_queue_closed_under_it() {
        let queue = WorkQueue::bounded(2);
        let goal = Arc::new(GoalTracker::new(10));
        queue.close();

        tokio::time::timeout(Duration::from_secs(1), producer(&queue, &goal).run())
            .await
            .expect("producer did not notice the closed queue");
    }
}
