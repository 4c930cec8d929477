//! The starship game protocol.
//!
//! Declaration order is the wire format: moving a message changes its tag
//! and breaks every client built against the old order. Append only.

use wireforge::prelude::{Category, Enum, MappingTarget, Message, Schema, TypeDescriptor};

pub fn part_kind() -> Enum {
    Enum::new(
        "PartKind",
        [
            "Core",
            "Cargo",
            "LandingThruster",
            "Hub",
            "SolarPanel",
            "Thruster",
            "SuperThruster",
            "EcoThruster",
            "PowerHub",
            "HubThruster",
            "LandingWheel",
        ],
    )
}

pub fn to_server() -> Category {
    Category::new("ToServerMsg")
        .message(
            Message::new("Handshake")
                .field("client", TypeDescriptor::STRING)
                .field("session", TypeDescriptor::optional(TypeDescriptor::STRING))
                .field("name", TypeDescriptor::STRING),
        )
        .message(
            Message::new("SetThrusters")
                .field("forward", TypeDescriptor::BOOL)
                .field("backward", TypeDescriptor::BOOL)
                .field("clockwise", TypeDescriptor::BOOL)
                .field("counter_clockwise", TypeDescriptor::BOOL),
        )
        .message(
            Message::new("CommitGrab")
                .field("grabbed_id", TypeDescriptor::U16)
                .field("x", TypeDescriptor::FLOAT)
                .field("y", TypeDescriptor::FLOAT),
        )
        .message(
            Message::new("MoveGrab")
                .field("x", TypeDescriptor::FLOAT)
                .field("y", TypeDescriptor::FLOAT),
        )
        .message(Message::new("ReleaseGrab"))
        .message(Message::new("BeamOut"))
        .message(Message::new("RequestUpdate"))
        .message(Message::new("SendChatMessage").field("msg", TypeDescriptor::STRING))
}

pub fn to_client() -> Category {
    Category::new("ToClientMsg")
        .message(
            Message::new("HandshakeAccepted")
                .field("id", TypeDescriptor::U16)
                .field("core_id", TypeDescriptor::U16)
                .field("can_beamout", TypeDescriptor::BOOL),
        )
        .message(
            Message::new("AddCelestialObject")
                .field("name", TypeDescriptor::STRING)
                .field("display_name", TypeDescriptor::STRING)
                .field("radius", TypeDescriptor::FLOAT)
                .field("id", TypeDescriptor::U16)
                .field("position", TypeDescriptor::FLOAT_PAIR),
        )
        .message(
            Message::new("AddPart")
                .field("id", TypeDescriptor::U16)
                .field("kind", TypeDescriptor::enum_named("PartKind")),
        )
        .message(
            Message::new("MovePart")
                .field("id", TypeDescriptor::U16)
                .field("x", TypeDescriptor::FLOAT)
                .field("y", TypeDescriptor::FLOAT)
                .field("rotation_n", TypeDescriptor::FLOAT)
                .field("rotation_i", TypeDescriptor::FLOAT),
        )
        .message(
            Message::new("UpdatePartMeta")
                .field("id", TypeDescriptor::U16)
                .field("owning_player", TypeDescriptor::optional(TypeDescriptor::U16))
                .field("thrust_mode", TypeDescriptor::U8),
        )
        .message(Message::new("RemovePart").field("id", TypeDescriptor::U16))
        .message(
            Message::new("AddPlayer")
                .field("id", TypeDescriptor::U16)
                .field("core_id", TypeDescriptor::U16)
                .field("name", TypeDescriptor::STRING),
        )
        .message(
            Message::new("UpdatePlayerMeta")
                .field("id", TypeDescriptor::U16)
                .field("thrust_forward", TypeDescriptor::BOOL)
                .field("thrust_backward", TypeDescriptor::BOOL)
                .field("thrust_clockwise", TypeDescriptor::BOOL)
                .field("thrust_counter_clockwise", TypeDescriptor::BOOL)
                .field("grabed_part", TypeDescriptor::optional(TypeDescriptor::U16)),
        )
        .message(Message::new("RemovePlayer").field("id", TypeDescriptor::U16))
        .message(Message::new("PostSimulationTick").field("your_power", TypeDescriptor::U32))
        .message(
            Message::new("UpdateMyMeta")
                .field("max_power", TypeDescriptor::U32)
                .field("can_beamout", TypeDescriptor::BOOL),
        )
        .message(Message::new("BeamOutAnimation").field("player_id", TypeDescriptor::U16))
        .message(Message::new("IncinerationAnimation").field("player_id", TypeDescriptor::U16))
        .message(Message::new("MessagePack").field("count", TypeDescriptor::U16))
        .message(
            Message::new("UpdatePlayerVelocity")
                .field("id", TypeDescriptor::U16)
                .field("vel_x", TypeDescriptor::FLOAT)
                .field("vel_y", TypeDescriptor::FLOAT),
        )
        .message(
            Message::new("ChatMessage")
                .field("username", TypeDescriptor::STRING)
                .field("msg", TypeDescriptor::STRING)
                .field("color", TypeDescriptor::STRING),
        )
}

pub fn protocol() -> Schema {
    Schema::builder()
        .enumeration(part_kind())
        .category(to_server())
        .category(to_client())
        .build()
}

/// Lookup tables for the browser client, named from its point of view.
pub fn mapping_targets() -> Vec<MappingTarget> {
    vec![
        MappingTarget::for_declaration("ToClientMsg", "FromServer"),
        MappingTarget::for_declaration("ToServerMsg", "ToServer"),
    ]
}
