//! Non-blocking input channel fed by the relay's datagrams.
//!
//! A receiver task drains the socket continuously and publishes into a
//! single-slot mailbox: the newest decodable direction overwrites any
//! unconsumed one, and reading clears the slot. The session loop polls the
//! mailbox once per tick and never touches the socket, so a silent or
//! unreachable relay can never stall the simulation.

use log::{debug, info};
use shared::{decode_command, Direction};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;

const SLOT_EMPTY: u8 = 0;

fn pack(direction: Direction) -> u8 {
    match direction {
        Direction::Up => 1,
        Direction::Down => 2,
        Direction::Left => 3,
        Direction::Right => 4,
    }
}

fn unpack(value: u8) -> Option<Direction> {
    match value {
        1 => Some(Direction::Up),
        2 => Some(Direction::Down),
        3 => Some(Direction::Left),
        4 => Some(Direction::Right),
        _ => None,
    }
}

/// The single-slot command mailbox shared with the receiver task.
///
/// `slot` holds at most one packed direction; writes overwrite, reads swap to
/// empty. `arrivals` counts every datagram, decodable or not, so the session
/// can use bare packet presence as its first-start trigger.
#[derive(Debug, Default)]
pub struct Mailbox {
    slot: AtomicU8,
    arrivals: AtomicU64,
}

impl Mailbox {
    /// Publishes one raw datagram payload. Undecodable payloads still count
    /// as an arrival but leave the slot untouched.
    pub fn deliver(&self, payload: &[u8]) {
        self.arrivals.fetch_add(1, Ordering::Release);
        match decode_command(payload) {
            Some(direction) => {
                self.slot.store(pack(direction), Ordering::Release);
            }
            None => {
                debug!("dropping undecodable payload ({} bytes)", payload.len());
            }
        }
    }
}

/// Reader handle over the mailbox, owned by the session loop.
pub struct InputChannel {
    mailbox: Arc<Mailbox>,
    local_addr: Option<SocketAddr>,
    consumed_arrivals: u64,
}

impl InputChannel {
    /// A channel with no socket behind it; commands arrive only through
    /// [`InputChannel::mailbox`]. Used by tests and by anything that wants to
    /// drive the session without the network.
    pub fn detached() -> Self {
        Self {
            mailbox: Arc::new(Mailbox::default()),
            local_addr: None,
            consumed_arrivals: 0,
        }
    }

    /// Binds the listening socket and spawns the receiver task.
    ///
    /// The task loops on `recv_from` forever, delivering every datagram into
    /// the mailbox. Receive errors are not fatal; the relay gets no feedback
    /// either way.
    pub async fn bind(addr: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let socket = UdpSocket::bind(addr).await?;
        let local_addr = socket.local_addr()?;
        info!("Listening for joystick datagrams on {}", local_addr);

        let mut channel = Self::detached();
        channel.local_addr = Some(local_addr);

        let mailbox = Arc::clone(&channel.mailbox);
        tokio::spawn(async move {
            let mut buffer = [0u8; 1024];
            loop {
                match socket.recv_from(&mut buffer).await {
                    Ok((len, _)) => mailbox.deliver(&buffer[..len]),
                    Err(e) => {
                        debug!("receive error, ignoring: {}", e);
                        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                    }
                }
            }
        });

        Ok(channel)
    }

    /// The bound address, if this channel has a socket.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// Direct handle to the mailbox, for injecting payloads in tests.
    pub fn mailbox(&self) -> Arc<Mailbox> {
        Arc::clone(&self.mailbox)
    }

    /// Takes the most recent pending command, clearing the slot.
    pub fn try_take_latest(&self) -> Option<Direction> {
        unpack(self.mailbox.slot.swap(SLOT_EMPTY, Ordering::AcqRel))
    }

    /// True when any datagram arrived since the previous call, regardless of
    /// whether it decoded to a command.
    pub fn poll_datagram_seen(&mut self) -> bool {
        let arrivals = self.mailbox.arrivals.load(Ordering::Acquire);
        let seen = arrivals != self.consumed_arrivals;
        self.consumed_arrivals = arrivals;
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::encode_command;

    #[test]
    fn test_empty_channel_yields_nothing() {
        let mut channel = InputChannel::detached();
        assert_eq!(channel.try_take_latest(), None);
        assert!(!channel.poll_datagram_seen());
    }

    #[test]
    fn test_newer_command_overwrites_older() {
        let channel = InputChannel::detached();
        let mailbox = channel.mailbox();

        mailbox.deliver(&encode_command(Direction::Up).unwrap());
        mailbox.deliver(&encode_command(Direction::Left).unwrap());

        assert_eq!(channel.try_take_latest(), Some(Direction::Left));
        // Reading cleared the slot.
        assert_eq!(channel.try_take_latest(), None);
    }

    #[test]
    fn test_malformed_payload_counts_as_presence_only() {
        let mut channel = InputChannel::detached();
        let mailbox = channel.mailbox();

        mailbox.deliver(&[0xDE, 0xAD, 0xBE, 0xEF]);

        assert_eq!(channel.try_take_latest(), None);
        assert!(channel.poll_datagram_seen());
        assert!(!channel.poll_datagram_seen());
    }

    #[test]
    fn test_malformed_payload_leaves_pending_command_alone() {
        let channel = InputChannel::detached();
        let mailbox = channel.mailbox();

        mailbox.deliver(&encode_command(Direction::Down).unwrap());
        mailbox.deliver(b"garbage");

        assert_eq!(channel.try_take_latest(), Some(Direction::Down));
    }

    #[test]
    fn test_presence_tracks_every_datagram() {
        let mut channel = InputChannel::detached();
        let mailbox = channel.mailbox();

        assert!(!channel.poll_datagram_seen());
        mailbox.deliver(&encode_command(Direction::Right).unwrap());
        assert!(channel.poll_datagram_seen());
        assert!(!channel.poll_datagram_seen());

        mailbox.deliver(b"");
        mailbox.deliver(&encode_command(Direction::Up).unwrap());
        assert!(channel.poll_datagram_seen());
    }
}
