//! # Mocking the Session Host
//!
//! [`MockHost<T>`] hands out a real [`HostClient<T>`] whose requests are answered from a queue
//! of scripted expectations instead of a running [`SessionHost`](crate::SessionHost).
//! Use it to test code that sits *around* a client (a domain client, a dialogue adapter)
//! without running any session logic.
//!
//! | | MockHost | Real host |
//! |---|---|---|
//! | **State** | none, answers are scripted | real sessions |
//! | **Error injection** | `return_err` | needs a session in a failing state |
//! | **Use case** | client wrappers, error paths | the session entity itself, end-to-end flows |
//!
//! For step-by-step control, [`create_mock_client`] returns the raw request receiver, and
//! [`expect_open`], [`expect_get`] and [`expect_turn`] pull the next request off it.
//!
//! ```rust
//! use session_host::mock::MockHost;
//! use session_host::{HostError, SessionEntity};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Chat { id: u32 }
//! #[derive(Debug, thiserror::Error)] #[error("chat error")] struct ChatError;
//!
//! #[async_trait]
//! impl SessionEntity for Chat {
//!     type Id = u32; type Open = (); type Snapshot = (); type Turn = String; type Reply = String;
//!     type Context = (); type Error = ChatError;
//!     fn open(id: u32, _: ()) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn restore(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_turn(&mut self, t: String, _: &()) -> Result<String, Self::Error> { Ok(t) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockHost::<Chat>::new();
//!     mock.expect_turn(7).return_err(HostError::HostClosed);
//!
//!     let result = mock.client().turn(7, "hello".into()).await;
//!     assert!(matches!(result, Err(HostError::HostClosed)));
//!     mock.verify();
//! }
//! ```

use crate::client::HostClient;
use crate::entity::SessionEntity;
use crate::error::HostError;
use crate::message::HostRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

/// A scripted answer for the next request.
enum Expectation<T: SessionEntity> {
    Open {
        response: Result<T::Id, HostError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, HostError>,
    },
    Restore {
        id: T::Id,
        response: Result<T, HostError>,
    },
    Close {
        id: T::Id,
        response: Result<(), HostError>,
    },
    Turn {
        id: T::Id,
        response: Result<T::Reply, HostError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A host stand-in that answers requests from a queue of expectations.
///
/// Expectations are consumed in order. A request that does not match the next expectation
/// (wrong kind or wrong id) panics the mock task, which the caller observes as
/// [`HostError::HostDropped`].
pub struct MockHost<T: SessionEntity> {
    client: HostClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: SessionEntity> Default for MockHost<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SessionEntity> MockHost<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<HostRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        HostRequest::Open { respond_to, .. },
                        Some(Expectation::Open { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        HostRequest::Get { id, respond_to },
                        Some(Expectation::Get {
                            id: expected,
                            response,
                        }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        HostRequest::Restore { id, respond_to, .. },
                        Some(Expectation::Restore {
                            id: expected,
                            response,
                        }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        HostRequest::Close { id, respond_to },
                        Some(Expectation::Close {
                            id: expected,
                            response,
                        }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        HostRequest::Turn { id, respond_to, .. },
                        Some(Expectation::Turn {
                            id: expected,
                            response,
                        }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: HostClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// The client wired to this mock.
    pub fn client(&self) -> HostClient<T> {
        self.client.clone()
    }

    /// Expects an `open` request.
    pub fn expect_open(&mut self) -> ExpectationBuilder<T, T::Id> {
        ExpectationBuilder::new(self.expectations.clone(), |response| {
            Expectation::Open { response }
        })
    }

    /// Expects a `get` request for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Get { id, response }
        })
    }

    /// Expects a `restore` request for `id`. The snapshot itself is not checked.
    pub fn expect_restore(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Restore { id, response }
        })
    }

    /// Expects a `close` request for `id`.
    pub fn expect_close(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Close { id, response }
        })
    }

    /// Expects a `turn` request for `id`.
    pub fn expect_turn(&mut self, id: T::Id) -> ExpectationBuilder<T, T::Reply> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Turn { id, response }
        })
    }

    /// Panics if any expectation was not consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Finishes an expectation with the answer the mock should give.
pub struct ExpectationBuilder<T: SessionEntity, R> {
    expectations: Queue<T>,
    build: Box<dyn FnOnce(Result<R, HostError>) -> Expectation<T> + Send>,
}

impl<T: SessionEntity, R> ExpectationBuilder<T, R> {
    fn new(
        expectations: Queue<T>,
        build: impl FnOnce(Result<R, HostError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            expectations,
            build: Box::new(build),
        }
    }

    /// Answer with a successful result.
    pub fn return_ok(self, value: R) {
        let expectation = (self.build)(Ok(value));
        self.expectations.lock().unwrap().push_back(expectation);
    }

    /// Answer with an error.
    pub fn return_err(self, error: HostError) {
        let expectation = (self.build)(Err(error));
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

// =============================================================================
// RECEIVER HELPERS
// =============================================================================

/// Creates a client together with the receiving end of its channel.
///
/// The test plays the host: it pulls requests off the receiver with the `expect_*`
/// helpers and answers through the returned responder.
pub fn create_mock_client<T: SessionEntity>(
    buffer_size: usize,
) -> (HostClient<T>, mpsc::Receiver<HostRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (HostClient::new(sender), receiver)
}

/// Next request, if it is an Open.
pub async fn expect_open<T: SessionEntity>(
    receiver: &mut mpsc::Receiver<HostRequest<T>>,
) -> Option<(T::Open, oneshot::Sender<Result<T::Id, HostError>>)> {
    match receiver.recv().await {
        Some(HostRequest::Open { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a Get.
pub async fn expect_get<T: SessionEntity>(
    receiver: &mut mpsc::Receiver<HostRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, HostError>>)> {
    match receiver.recv().await {
        Some(HostRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a Turn.
pub async fn expect_turn<T: SessionEntity>(
    receiver: &mut mpsc::Receiver<HostRequest<T>>,
) -> Option<(
    T::Id,
    T::Turn,
    oneshot::Sender<Result<T::Reply, HostError>>,
)> {
    match receiver.recv().await {
        Some(HostRequest::Turn {
            id,
            turn,
            respond_to,
        }) => Some((id, turn, respond_to)),
        _ => None,
    }
}
