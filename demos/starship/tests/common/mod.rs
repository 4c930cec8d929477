//! One value of every starship message, shared by the integration tests.
//!
//! Floats are exactly representable so decoded values compare equal.

#![allow(dead_code)]

use starship::{PartKind, ToClientMsg, ToServerMsg};

pub fn to_server_samples() -> Vec<ToServerMsg> {
    vec![
        ToServerMsg::Handshake {
            client: "starship-web".into(),
            session: Some("a1b2".into()),
            name: "Ripley".into(),
        },
        ToServerMsg::SetThrusters {
            forward: true,
            backward: false,
            clockwise: true,
            counter_clockwise: false,
        },
        ToServerMsg::CommitGrab {
            grabbed_id: 513,
            x: 12.5,
            y: -3.75,
        },
        ToServerMsg::MoveGrab { x: 0.25, y: 100.0 },
        ToServerMsg::ReleaseGrab,
        ToServerMsg::BeamOut,
        ToServerMsg::RequestUpdate,
        ToServerMsg::SendChatMessage { msg: "hello, world".into() },
    ]
}

pub fn to_client_samples() -> Vec<ToClientMsg> {
    vec![
        ToClientMsg::HandshakeAccepted {
            id: 1,
            core_id: 65_535,
            can_beamout: true,
        },
        ToClientMsg::AddCelestialObject {
            name: "earth".into(),
            display_name: "Earth".into(),
            radius: 25.0,
            id: 3,
            position: (0.0, -10.5),
        },
        ToClientMsg::AddPart {
            id: 42,
            kind: PartKind::LandingWheel,
        },
        ToClientMsg::MovePart {
            id: 42,
            x: 1.5,
            y: -2.5,
            rotation_n: 0.5,
            rotation_i: -0.125,
        },
        ToClientMsg::UpdatePartMeta {
            id: 300,
            owning_player: Some(12),
            thrust_mode: 2,
        },
        ToClientMsg::RemovePart { id: 7 },
        ToClientMsg::AddPlayer {
            id: 2,
            core_id: 99,
            name: "Dallas".into(),
        },
        ToClientMsg::UpdatePlayerMeta {
            id: 2,
            thrust_forward: false,
            thrust_backward: true,
            thrust_clockwise: false,
            thrust_counter_clockwise: true,
            grabed_part: None,
        },
        ToClientMsg::RemovePlayer { id: 2 },
        ToClientMsg::PostSimulationTick { your_power: 4_000_000_000 },
        ToClientMsg::UpdateMyMeta {
            max_power: 70_000,
            can_beamout: false,
        },
        ToClientMsg::BeamOutAnimation { player_id: 4 },
        ToClientMsg::IncinerationAnimation { player_id: 5 },
        ToClientMsg::MessagePack { count: 16 },
        ToClientMsg::UpdatePlayerVelocity {
            id: 1,
            vel_x: 0.5,
            vel_y: -2.25,
        },
        ToClientMsg::ChatMessage {
            username: "Server".into(),
            msg: "héllo".into(),
            color: "#e270ff".into(),
        },
    ]
}

pub fn encode_client(msg: &ToClientMsg) -> Vec<u8> {
    let mut out = Vec::new();
    msg.serialize(&mut out);
    out
}

pub fn encode_server(msg: &ToServerMsg) -> Vec<u8> {
    let mut out = Vec::new();
    msg.serialize(&mut out);
    out
}

pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

pub fn from_hex(hex: &str) -> Vec<u8> {
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap())
        .collect()
}
