#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode};
use hickory_proto::rr::Record;
use hickory_proto::serialize::binary::BinEncodable;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// How the mock upstream treats each query it receives.
#[derive(Clone)]
pub enum MockBehavior {
    /// Reply with these answer and additional records.
    Answer {
        answers: Vec<Record>,
        additionals: Vec<Record>,
    },
    /// Send a reply with the wrong transaction ID first, then the real one.
    StaleThenAnswer { answers: Vec<Record> },
    /// Echo the query ID followed by bytes that do not parse.
    Garbage,
    /// Never reply.
    Silent,
}

pub struct MockDnsServer {
    addr: SocketAddr,
    received: Arc<AtomicUsize>,
    last_reply: Arc<std::sync::Mutex<Option<Vec<u8>>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let received = Arc::new(AtomicUsize::new(0));
        let last_reply = Arc::new(std::sync::Mutex::new(None));

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let task_received = received.clone();
        let task_last_reply = last_reply.clone();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        task_received.fetch_add(1, Ordering::SeqCst);

                        for reply in Self::replies_for(&behavior, &buf[..len]) {
                            *task_last_reply.lock().unwrap() = Some(reply.clone());
                            let _ = socket.send_to(&reply, peer).await;
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            received,
            last_reply,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn received(&self) -> usize {
        self.received.load(Ordering::SeqCst)
    }

    /// Bytes of the last datagram sent back.
    pub fn last_reply(&self) -> Option<Vec<u8>> {
        self.last_reply.lock().unwrap().clone()
    }

    fn replies_for(behavior: &MockBehavior, query: &[u8]) -> Vec<Vec<u8>> {
        let Ok(request) = Message::from_vec(query) else {
            return Vec::new();
        };

        match behavior {
            MockBehavior::Answer {
                answers,
                additionals,
            } => vec![Self::build_reply(&request, request.id(), answers, additionals)],
            MockBehavior::StaleThenAnswer { answers } => vec![
                Self::build_reply(&request, request.id().wrapping_add(1), answers, &[]),
                Self::build_reply(&request, request.id(), answers, &[]),
            ],
            MockBehavior::Garbage => {
                let mut reply = query[..2].to_vec();
                reply.extend_from_slice(&[0x81, 0x80, 0xff]);
                vec![reply]
            }
            MockBehavior::Silent => Vec::new(),
        }
    }

    fn build_reply(
        request: &Message,
        id: u16,
        answers: &[Record],
        additionals: &[Record],
    ) -> Vec<u8> {
        let mut reply = Message::new(id, MessageType::Response, OpCode::Query);
        reply.set_recursion_desired(true);
        reply.set_recursion_available(true);
        for query in request.queries() {
            reply.add_query(query.clone());
        }
        for record in answers {
            reply.add_answer(record.clone());
        }
        for record in additionals {
            reply.add_additional(record.clone());
        }
        reply.to_vec().unwrap()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
