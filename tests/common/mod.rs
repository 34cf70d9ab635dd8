//! Byte-level fixture builder shared by the integration tests.
#![allow(dead_code)]

/// Little-endian writer for hand-built property bag fixtures.
#[derive(Debug, Default, Clone)]
pub struct Fixture {
    bytes: Vec<u8>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn u8(self, v: u8) -> Self {
        self.raw(&[v])
    }

    pub fn i32(self, v: i32) -> Self {
        self.raw(&v.to_le_bytes())
    }

    pub fn u32(self, v: u32) -> Self {
        self.raw(&v.to_le_bytes())
    }

    pub fn f32(self, v: f32) -> Self {
        self.raw(&v.to_le_bytes())
    }

    pub fn u64(self, v: u64) -> Self {
        self.raw(&v.to_le_bytes())
    }

    /// Narrow string: length including the NUL, bytes, NUL.
    pub fn str(self, s: &str) -> Self {
        self.i32(s.len() as i32 + 1).raw(s.as_bytes()).u8(0)
    }

    /// Text value in the single-byte encoding. ASCII input only.
    pub fn text(self, s: &str) -> Self {
        assert!(s.is_ascii(), "fixture text must be ASCII: {:?}", s);
        self.str(s)
    }

    /// Text value in UTF-16LE with a negative character count.
    pub fn wide_text(mut self, s: &str) -> Self {
        let units: Vec<u16> = s.encode_utf16().collect();
        self = self.i32(-(units.len() as i32 + 1));
        for unit in units {
            self = self.raw(&unit.to_le_bytes());
        }
        self.raw(&[0, 0])
    }

    /// Key, kind tag, declared size and the 4 reserved bytes.
    pub fn prop(self, key: &str, kind: &str, declared_size: u32) -> Self {
        self.str(key).str(kind).u32(declared_size).raw(&[0; 4])
    }

    pub fn int_prop(self, key: &str, v: i32) -> Self {
        self.prop(key, "IntProperty", 4).i32(v)
    }

    pub fn str_prop(self, key: &str, v: &str) -> Self {
        self.prop(key, "StrProperty", v.len() as u32 + 5).text(v)
    }

    pub fn name_prop(self, key: &str, v: &str) -> Self {
        self.prop(key, "NameProperty", v.len() as u32 + 5).text(v)
    }

    /// The dictionary terminator.
    pub fn end(self) -> Self {
        self.str("None")
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

/// Wraps a header body in the size + CRC envelope.
pub fn envelope(body: Vec<u8>, crc: u32) -> Vec<u8> {
    Fixture::new()
        .i32(body.len() as i32)
        .u32(crc)
        .raw(&body)
        .build()
}

/// A header body with net version, game type, and the given dictionary bytes.
pub fn header_body(major: i32, minor: i32, net: i32, game_type: &str, dict: Fixture) -> Vec<u8> {
    Fixture::new()
        .i32(major)
        .i32(minor)
        .i32(net)
        .text(game_type)
        .raw(&dict.build())
        .build()
}

/// A complete file resembling a match replay header.
pub fn sample_replay() -> Vec<u8> {
    let goal = |name: &str, frame: i32, team: i32| {
        Fixture::new()
            .prop("PlayerName", "StrProperty", 0)
            .wide_text(name)
            .int_prop("PlayerTeam", team)
            .int_prop("frame", frame)
            .end()
    };

    let goals = Fixture::new()
        .raw(&goal("Kestrel", 1204, 0).build())
        .raw(&goal("Müller", 2950, 1).build());

    let player_stats = Fixture::new()
        .prop("OnlineID", "QWordProperty", 8)
        .u64(76_561_198_000_000_001)
        .prop("Platform", "ByteProperty", 21)
        .str("OnlinePlatform")
        .str("OnlinePlatform_Steam")
        .prop("bBot", "BoolProperty", 0)
        .u8(0)
        .end();

    let dict = Fixture::new()
        .int_prop("TeamSize", 3)
        .int_prop("Team0Score", 1)
        .int_prop("Team1Score", 1)
        .prop("Goals", "ArrayProperty", goals.len() as u32 + 4)
        .i32(2)
        .raw(&goals.build())
        .prop("PlayerName", "StrProperty", 20)
        .wide_text("Müller")
        .prop("RecordFPS", "FloatProperty", 4)
        .f32(30.0)
        .name_prop("MapName", "stadium_p")
        .prop("PlayerStats", "ArrayProperty", player_stats.len() as u32 + 4)
        .i32(1)
        .raw(&player_stats.build())
        .prop("bMatchEnded", "BoolProperty", 0)
        .u8(1)
        .end();

    envelope(
        header_body(868, 20, 10, "TAGame.Replay_Soccar_TA", dict),
        0xDEAD_BEEF,
    )
}
