//! Status-update wire format.
//!
//! Every field is a 32-bit little-endian integer and frames have no length
//! prefix, so a request is always [`UPDATE_REQUEST_SIZE`] bytes and a response
//! always [`UPDATE_RESPONSE_SIZE`] bytes.
//!
//! The peer keeps a table of [`STATUS_TABLE_LEN`] values. An update request
//! stores `value` at index `id` and is answered with the whole table.

use serde::{Deserialize, Serialize};

use crate::config::CrossingConfig;
use crate::error::LinkError;
use crate::state::Transition;

pub const STATUS_TABLE_LEN: usize = 30;
pub const UPDATE_REQUEST_SIZE: usize = 3 * 4;
pub const UPDATE_RESPONSE_SIZE: usize = (3 + STATUS_TABLE_LEN) * 4;

pub type RequestFrame = [u8; UPDATE_REQUEST_SIZE];
pub type ResponseFrame = [u8; UPDATE_RESPONSE_SIZE];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(i32)]
pub enum MessageKind {
    Ping = 1,
    Update = 2,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Word(#[serde(with = "postcard::fixint::le")] i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UpdateRequest {
    #[serde(with = "postcard::fixint::le")]
    pub kind: i32,
    #[serde(with = "postcard::fixint::le")]
    pub id: i32,
    #[serde(with = "postcard::fixint::le")]
    pub value: i32,
}

impl UpdateRequest {
    pub const fn new(id: i32, value: i32) -> Self {
        Self {
            kind: MessageKind::Update as i32,
            id,
            value,
        }
    }

    pub fn encode(&self) -> Result<RequestFrame, LinkError> {
        encode_frame(self)
    }

    pub fn decode(frame: &[u8]) -> Result<Self, LinkError> {
        postcard::from_bytes(frame).map_err(|_| LinkError::Decode)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResponse {
    #[serde(with = "postcard::fixint::le")]
    pub kind: i32,
    #[serde(with = "postcard::fixint::le")]
    pub id: i32,
    #[serde(with = "postcard::fixint::le")]
    pub average: i32,
    values: [Word; STATUS_TABLE_LEN],
}

impl UpdateResponse {
    pub fn new(id: i32, average: i32, values: [i32; STATUS_TABLE_LEN]) -> Self {
        Self {
            kind: MessageKind::Update as i32,
            id,
            average,
            values: values.map(Word),
        }
    }

    /// Value stored at `slot`, if the table has one.
    pub fn value(&self, slot: usize) -> Option<i32> {
        self.values.get(slot).map(|w| w.0)
    }

    pub fn encode(&self) -> Result<ResponseFrame, LinkError> {
        encode_frame(self)
    }

    /// Decode a full response frame. Frames that are not UPDATE replies are
    /// rejected.
    pub fn decode(frame: &[u8]) -> Result<Self, LinkError> {
        let response: UpdateResponse = postcard::from_bytes(frame).map_err(|_| LinkError::Decode)?;
        if response.kind != MessageKind::Update as i32 {
            return Err(LinkError::UnknownKind(response.kind));
        }
        Ok(response)
    }
}

/// Requests the crossing sends to the peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Request {
    /// First contact after start-up: resets the shared status slot.
    Announce,
    /// Periodic fetch of the status table.
    Poll,
    /// A local switch moved; tell the peer.
    Publish(Transition),
}

impl Request {
    pub fn to_update(self, config: &CrossingConfig) -> UpdateRequest {
        let slot = config.status_slot as i32;
        match self {
            Request::Announce => UpdateRequest::new(slot, config.announce_value),
            Request::Poll => UpdateRequest::new(config.poll_id, config.poll_value),
            Request::Publish(transition) => UpdateRequest::new(slot, transition.code()),
        }
    }

    pub fn encode(self, config: &CrossingConfig) -> Result<RequestFrame, LinkError> {
        self.to_update(config).encode()
    }
}

fn encode_frame<T: Serialize, const N: usize>(message: &T) -> Result<[u8; N], LinkError> {
    let mut frame = [0u8; N];
    let used = postcard::to_slice(message, &mut frame)
        .map_err(|_| LinkError::Encode)?
        .len();
    if used != N {
        return Err(LinkError::Encode);
    }
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_layout_is_three_little_endian_words() {
        let frame = UpdateRequest::new(27, -1).encode().unwrap();
        assert_eq!(
            frame,
            [2, 0, 0, 0, 27, 0, 0, 0, 0xff, 0xff, 0xff, 0xff],
        );
        assert_eq!(UpdateRequest::decode(&frame).unwrap(), UpdateRequest::new(27, -1));
    }

    #[test]
    fn response_value_is_read_at_its_slot() {
        let mut values = [0; STATUS_TABLE_LEN];
        values[27] = 3;
        values[29] = -7;
        let frame = UpdateResponse::new(0, 1, values).encode().unwrap();
        assert_eq!(frame.len(), 132);
        // values[27] starts after the three header words
        let offset = (3 + 27) * 4;
        assert_eq!(&frame[offset..offset + 4], &[3, 0, 0, 0]);

        let response = UpdateResponse::decode(&frame).unwrap();
        assert_eq!(response.value(27), Some(3));
        assert_eq!(response.value(29), Some(-7));
        assert_eq!(response.value(30), None);
        assert_eq!(response.average, 1);
    }

    #[test]
    fn ping_replies_are_rejected() {
        let mut frame = UpdateResponse::new(0, 0, [0; STATUS_TABLE_LEN]).encode().unwrap();
        frame[0] = MessageKind::Ping as u8;
        assert_eq!(UpdateResponse::decode(&frame), Err(LinkError::UnknownKind(1)));
    }

    #[test]
    fn truncated_frames_do_not_decode() {
        let frame = UpdateResponse::new(0, 0, [0; STATUS_TABLE_LEN]).encode().unwrap();
        assert_eq!(
            UpdateResponse::decode(&frame[..UPDATE_RESPONSE_SIZE - 1]),
            Err(LinkError::Decode)
        );
    }

    #[test]
    fn requests_map_onto_update_messages() {
        let config = CrossingConfig::default();
        assert_eq!(Request::Announce.to_update(&config), UpdateRequest::new(27, -1));
        assert_eq!(Request::Poll.to_update(&config), UpdateRequest::new(0, 0));
        assert_eq!(
            Request::Publish(Transition::TrainSwitchLow).to_update(&config),
            UpdateRequest::new(27, 3)
        );
    }
}
