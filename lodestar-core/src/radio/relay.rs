//! Radio relay controller
//!
//! Link state machine:
//!
//! ```text
//! Advertising --Connected--> Connected (send identification once)
//!      ^                         |
//!      +-----Disconnected--------+ (request advertising)
//! ```
//!
//! While connected, one position sentence is sent per transmit interval.
//! Delivery is best effort: a failed notify is logged and dropped, and the
//! next interval sends fresh state.

use lodestar_hal::{RadioError, RadioLink};
use lodestar_protocol::{encode_identification, encode_position, SentenceError};

use crate::config::DeviceIdentity;
use crate::fix::FixSnapshot;

/// Radio link state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// Discoverable, no peer
    #[default]
    Advertising,
    /// Peer connected
    Connected,
}

/// Connection events surfaced by the radio stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    Connected,
    Disconnected,
}

/// Result of one relay tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TxOutcome {
    /// Not connected; nothing attempted
    Idle,
    /// Connected but the interval has not elapsed
    NotDue,
    /// Position sentence handed to the radio
    Sent,
    /// Send failed and was dropped
    Dropped(TxError),
}

/// Why a sentence was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TxError {
    Encode(SentenceError),
    Radio(RadioError),
}

impl From<SentenceError> for TxError {
    fn from(e: SentenceError) -> Self {
        TxError::Encode(e)
    }
}

impl From<RadioError> for TxError {
    fn from(e: RadioError) -> Self {
        TxError::Radio(e)
    }
}

/// Radio relay controller
#[derive(Debug, Clone)]
pub struct RelayController {
    state: LinkState,
    /// Minimum spacing between position sentences (ms)
    interval_ms: u32,
    /// Start of the current transmit interval (ms)
    last_tx_ms: u32,
    identity: DeviceIdentity,
    /// Position sentences sent since startup
    sent: u32,
    /// Sentences dropped since startup
    dropped: u32,
}

impl RelayController {
    pub fn new(interval_ms: u32, identity: DeviceIdentity) -> Self {
        Self {
            state: LinkState::Advertising,
            interval_ms,
            last_tx_ms: 0,
            identity,
            sent: 0,
            dropped: 0,
        }
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == LinkState::Connected
    }

    pub fn sent(&self) -> u32 {
        self.sent
    }

    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Process a connection event from the radio stack
    ///
    /// On the connect edge the identification sentence is sent
    /// synchronously and the transmit interval starts. A repeated connect
    /// event while already connected is ignored.
    pub fn on_event<R: RadioLink + ?Sized>(&mut self, event: LinkEvent, now_ms: u32, link: &mut R) {
        match (self.state, event) {
            (LinkState::Advertising, LinkEvent::Connected) => {
                info!("radio peer connected");
                self.state = LinkState::Connected;
                self.last_tx_ms = now_ms;
                if let Err(e) = self.send_identification(link) {
                    self.dropped = self.dropped.saturating_add(1);
                    warn!("identification send failed: {}", e);
                }
            }
            (LinkState::Connected, LinkEvent::Disconnected) => {
                info!("radio peer disconnected");
                self.state = LinkState::Advertising;
                if let Err(e) = link.start_advertising() {
                    warn!("restart advertising failed: {}", e);
                }
            }
            (LinkState::Advertising, LinkEvent::Disconnected) => {
                // Stack may report a failed connect attempt this way
                if let Err(e) = link.start_advertising() {
                    warn!("restart advertising failed: {}", e);
                }
            }
            (LinkState::Connected, LinkEvent::Connected) => {}
        }
    }

    /// Send a position sentence if connected and the interval has elapsed
    pub fn tick<R: RadioLink + ?Sized>(
        &mut self,
        now_ms: u32,
        snapshot: &FixSnapshot,
        link: &mut R,
    ) -> TxOutcome {
        if self.state != LinkState::Connected {
            return TxOutcome::Idle;
        }
        if now_ms.wrapping_sub(self.last_tx_ms) < self.interval_ms {
            return TxOutcome::NotDue;
        }

        // Interval restarts whether or not the send succeeds
        self.last_tx_ms = now_ms;

        match Self::send_position(snapshot, link) {
            Ok(()) => {
                self.sent = self.sent.saturating_add(1);
                TxOutcome::Sent
            }
            Err(e) => {
                self.dropped = self.dropped.saturating_add(1);
                warn!("position send dropped: {}", e);
                TxOutcome::Dropped(e)
            }
        }
    }

    fn send_identification<R: RadioLink + ?Sized>(&self, link: &mut R) -> Result<(), TxError> {
        let sentence = encode_identification(self.identity.id, &self.identity.name)?;
        link.notify(sentence.as_bytes())?;
        Ok(())
    }

    fn send_position<R: RadioLink + ?Sized>(
        snapshot: &FixSnapshot,
        link: &mut R,
    ) -> Result<(), TxError> {
        let sentence = encode_position(&snapshot.to_position_fix())?;
        link.notify(sentence.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingRadio;

    const INTERVAL: u32 = 1_000;

    fn relay() -> RelayController {
        RelayController::new(INTERVAL, DeviceIdentity::default())
    }

    #[test]
    fn test_advertising_sends_nothing() {
        let mut relay = relay();
        let mut radio = RecordingRadio::new();
        for t in (0..10_000).step_by(100) {
            assert_eq!(relay.tick(t, &FixSnapshot::new(), &mut radio), TxOutcome::Idle);
        }
        assert!(radio.sent().is_empty());
    }

    #[test]
    fn test_connect_sends_identification_once() {
        let mut relay = relay();
        let mut radio = RecordingRadio::new();

        relay.on_event(LinkEvent::Connected, 500, &mut radio);
        relay.on_event(LinkEvent::Connected, 600, &mut radio);

        assert_eq!(radio.sent().len(), 1);
        assert_eq!(radio.sent()[0].as_slice(), b"$PATOM,0A71,Lodestar*06\r\n");
    }

    #[test]
    fn test_connect_then_disconnect_sends_no_position() {
        let mut relay = relay();
        let mut radio = RecordingRadio::new();
        let snapshot = FixSnapshot::new();

        relay.on_event(LinkEvent::Connected, 5_000, &mut radio);
        assert_eq!(relay.tick(5_100, &snapshot, &mut radio), TxOutcome::NotDue);
        relay.on_event(LinkEvent::Disconnected, 5_200, &mut radio);
        assert_eq!(relay.tick(7_000, &snapshot, &mut radio), TxOutcome::Idle);

        assert_eq!(radio.sent().len(), 1);
        assert!(radio.sent()[0].starts_with(b"$PATOM"));
        assert_eq!(radio.advertise_requests(), 1);
        assert_eq!(relay.state(), LinkState::Advertising);
    }

    #[test]
    fn test_position_every_interval() {
        let mut relay = relay();
        let mut radio = RecordingRadio::new();
        let snapshot = FixSnapshot::new();

        relay.on_event(LinkEvent::Connected, 0, &mut radio);
        let mut sent = 0;
        for t in (100..=3_000).step_by(100) {
            if relay.tick(t, &snapshot, &mut radio) == TxOutcome::Sent {
                sent += 1;
            }
        }
        assert_eq!(sent, 3);
        assert!(radio.sent()[1].starts_with(b"$GPGGA,000000.000,"));
    }

    #[test]
    fn test_failed_send_is_dropped_and_retried_next_interval() {
        let mut relay = relay();
        let mut radio = RecordingRadio::new();
        let snapshot = FixSnapshot::new();
        relay.on_event(LinkEvent::Connected, 0, &mut radio);

        radio.fail_next(RadioError::Busy);
        assert_eq!(
            relay.tick(1_000, &snapshot, &mut radio),
            TxOutcome::Dropped(TxError::Radio(RadioError::Busy))
        );
        assert_eq!(relay.tick(1_500, &snapshot, &mut radio), TxOutcome::NotDue);
        assert_eq!(relay.tick(2_000, &snapshot, &mut radio), TxOutcome::Sent);
        assert_eq!(relay.dropped(), 1);
        assert_eq!(relay.sent(), 1);
    }

    #[test]
    fn test_reconnect_sends_identification_again() {
        let mut relay = relay();
        let mut radio = RecordingRadio::new();

        relay.on_event(LinkEvent::Connected, 0, &mut radio);
        relay.on_event(LinkEvent::Disconnected, 100, &mut radio);
        relay.on_event(LinkEvent::Connected, 200, &mut radio);

        let idents = radio
            .sent()
            .iter()
            .filter(|s| s.starts_with(b"$PATOM"))
            .count();
        assert_eq!(idents, 2);
    }

    #[test]
    fn test_advertising_failure_is_not_fatal() {
        let mut relay = relay();
        let mut radio = RecordingRadio::new();
        relay.on_event(LinkEvent::Connected, 0, &mut radio);
        radio.fail_next(RadioError::Link);
        relay.on_event(LinkEvent::Disconnected, 100, &mut radio);
        assert_eq!(relay.state(), LinkState::Advertising);
    }
}
