use async_trait::async_trait;
use session_host::{HostError, SessionEntity, SessionHost};

// --- Test Session ---

#[derive(Clone, Debug, PartialEq)]
struct Tally {
    id: u32,
    caller: String,
    total: u32,
}

#[derive(Debug)]
enum TallyTurn {
    Add(u32),
    Reset,
}

#[derive(Debug, thiserror::Error)]
enum TallyError {
    #[error("caller must not be empty")]
    NoCaller,
    #[error("total {0} exceeds limit")]
    Overflow(u32),
}

#[async_trait]
impl SessionEntity for Tally {
    type Id = u32;
    type Open = String;
    type Snapshot = u32;
    type Turn = TallyTurn;
    type Reply = u32;
    type Context = u32; // upper limit
    type Error = TallyError;

    fn open(id: u32, caller: String) -> Result<Self, Self::Error> {
        if caller.is_empty() {
            return Err(TallyError::NoCaller);
        }
        Ok(Self {
            id,
            caller,
            total: 0,
        })
    }

    async fn restore(&mut self, total: u32, limit: &u32) -> Result<(), Self::Error> {
        if total > *limit {
            return Err(TallyError::Overflow(total));
        }
        self.total = total;
        Ok(())
    }

    async fn handle_turn(&mut self, turn: TallyTurn, limit: &u32) -> Result<u32, Self::Error> {
        match turn {
            TallyTurn::Add(n) => {
                let next = self.total + n;
                if next > *limit {
                    return Err(TallyError::Overflow(next));
                }
                self.total = next;
            }
            TallyTurn::Reset => self.total = 0,
        }
        Ok(self.total)
    }
}

#[tokio::test]
async fn test_session_full_lifecycle() {
    let (host, client) = SessionHost::<Tally>::new(10);
    let handle = tokio::spawn(host.run(100));

    // 1. Open
    let id = client.open("alice".into()).await.unwrap();
    assert_eq!(id, 1); // first id is 1

    // 2. Turns
    assert_eq!(client.turn(id, TallyTurn::Add(40)).await.unwrap(), 40);
    assert_eq!(client.turn(id, TallyTurn::Add(2)).await.unwrap(), 42);

    // 3. Failing turn leaves state untouched
    let err = client.turn(id, TallyTurn::Add(100)).await.unwrap_err();
    assert!(matches!(err, HostError::Session(_)));
    assert!(err.to_string().contains("exceeds limit"));
    assert_eq!(client.get(id).await.unwrap().unwrap().total, 42);

    // 4. Restore
    let restored = client.restore(id, 7).await.unwrap();
    assert_eq!(restored.total, 7);
    assert!(client.restore(id, 500).await.is_err());
    assert_eq!(client.turn(id, TallyTurn::Reset).await.unwrap(), 0);

    // 5. Close
    client.close(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let (host, client) = SessionHost::<Tally>::new(10);
    tokio::spawn(host.run(100));

    let a = client.open("alice".into()).await.unwrap();
    let b = client.open("bob".into()).await.unwrap();
    assert_ne!(a, b);

    client.turn(a, TallyTurn::Add(5)).await.unwrap();
    client.turn(b, TallyTurn::Add(9)).await.unwrap();

    assert_eq!(client.get(a).await.unwrap().unwrap().total, 5);
    let bob = client.get(b).await.unwrap().unwrap();
    assert_eq!(bob.total, 9);
    assert_eq!(bob.caller, "bob");
}

#[tokio::test]
async fn test_unknown_session_is_reported() {
    let (host, client) = SessionHost::<Tally>::new(10);
    tokio::spawn(host.run(100));

    let err = client.turn(99, TallyTurn::Reset).await.unwrap_err();
    assert!(matches!(err, HostError::SessionNotFound(ref id) if id == "99"));
    assert!(matches!(
        client.close(99).await,
        Err(HostError::SessionNotFound(_))
    ));
    assert!(matches!(
        client.restore(99, 1).await,
        Err(HostError::SessionNotFound(_))
    ));
}

#[tokio::test]
async fn test_failed_open_stores_nothing() {
    let (host, client) = SessionHost::<Tally>::new(10);
    tokio::spawn(host.run(100));

    assert!(matches!(
        client.open(String::new()).await,
        Err(HostError::Session(_))
    ));
    // The rejected open still advanced the id counter.
    assert_eq!(client.open("carol".into()).await.unwrap(), 2);
    assert!(client.get(1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_concurrent_turns_are_serialized() {
    let (host, client) = SessionHost::<Tally>::new(4);
    tokio::spawn(host.run(1_000));

    let id = client.open("dave".into()).await.unwrap();

    let mut handles = vec![];
    for _ in 0..50 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client.turn(id, TallyTurn::Add(2)).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(client.get(id).await.unwrap().unwrap().total, 100);
}

#[tokio::test]
async fn test_dropped_host_reports_closed() {
    let (host, client) = SessionHost::<Tally>::new(1);
    drop(host);
    assert!(matches!(
        client.open("erin".into()).await,
        Err(HostError::HostClosed)
    ));
}
