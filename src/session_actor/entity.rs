use crate::model::{Session, SessionId, SessionOpen, SessionSnapshot, WorkflowStage};
use crate::session_actor::SessionError;
use crate::workflow::{Operation, Reply, Workflow};
use async_trait::async_trait;
use session_host::SessionEntity;
use std::sync::Arc;
use tracing::{debug, info};

#[async_trait]
impl SessionEntity for Session {
    type Id = SessionId;
    type Open = SessionOpen;
    type Snapshot = SessionSnapshot;
    type Turn = Operation;
    type Reply = Reply;
    type Context = Arc<Workflow>;
    type Error = SessionError;

    fn open(id: SessionId, params: SessionOpen) -> Result<Self, Self::Error> {
        Ok(Session::new(id, params.caller))
    }

    async fn on_open(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        info!(session_id = %self.id, caller = ?self.caller, "Conversation started");
        Ok(())
    }

    /// Adopts a snapshot the dialogue host persisted.
    ///
    /// A checkout total must still match the cart it was computed from.
    async fn restore(
        &mut self,
        snapshot: SessionSnapshot,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if snapshot.stage == WorkflowStage::Checkout {
            if let Some(found) = snapshot.order.total {
                let expected = snapshot.order.cart_total();
                if found != expected {
                    return Err(SessionError::InconsistentSnapshot { expected, found });
                }
            }
        }

        self.stage = snapshot.stage;
        self.order = snapshot.order;
        Ok(())
    }

    async fn on_close(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        info!(
            session_id = %self.id,
            stage = %self.stage,
            items = self.order.cart.len(),
            confirmed = self.order.confirmed,
            "Conversation ended"
        );
        Ok(())
    }

    async fn handle_turn(
        &mut self,
        turn: Operation,
        workflow: &Self::Context,
    ) -> Result<Reply, Self::Error> {
        let operation = turn.kind();
        let outcome = workflow.apply(self.stage, &self.order, turn);

        if let Some(refusal) = &outcome.reply.refusal {
            debug!(session_id = %self.id, %operation, %refusal, "Refused");
        }
        if let Some(next) = outcome.reply.switch_to {
            if next != self.stage {
                info!(session_id = %self.id, from = %self.stage, to = %next, %operation, "Stage change");
            }
            self.stage = next;
        }
        self.order = outcome.state;

        Ok(outcome.reply)
    }
}
