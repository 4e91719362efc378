//! Building layout document model.
//!
//! A `LayoutSpec` is what a loader produces from a building description.
//! Room rectangles are given by centre and extent in metres; the builder
//! rasterizes them.
//!
//! # Example
//!
//! ```
//! use sweep_grid::LayoutSpec;
//!
//! let layout: LayoutSpec = serde_json::from_str(r#"{
//!     "rooms": [
//!         { "id": "lobby", "x": 2.0, "y": 2.0, "width": 4.0, "height": 4.0, "is_exit": true },
//!         { "id": "r1",    "x": 7.0, "y": 2.0, "width": 6.0, "height": 4.0, "occupants": 3 }
//!     ],
//!     "connections": [ { "from": "lobby", "to": "r1" } ],
//!     "fire_origin": "r1",
//!     "responder_starts": [ { "x": 1.0, "y": 2.0 } ]
//! }"#).unwrap();
//! assert_eq!(layout.total_occupants(), 3);
//! ```

use serde::{Deserialize, Serialize};

use sweep_core::{Point, SimRng};

/// Whether a room rectangle gets a perimeter wall.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    /// Enclosed room: the outermost ring of cells becomes wall.
    #[default]
    Room,
    /// Corridor or open area: no perimeter wall.
    Hallway,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomSpec {
    pub id: String,
    /// Centre of the rectangle, metres.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub occupants: u32,
    /// Exit rooms are never searched and carry no perimeter wall.
    #[serde(default)]
    pub is_exit: bool,
    #[serde(default)]
    pub kind: RoomKind,
}

impl RoomSpec {
    /// `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        (self.x - hw, self.y - hh, self.x + hw, self.y + hh)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn contains(&self, p: Point) -> bool {
        let (x0, y0, x1, y1) = self.bounds();
        p.x > x0 && p.x < x1 && p.y > y0 && p.y < y1
    }

    /// Whether the builder puts a wall ring around this room.
    pub fn is_walled(&self) -> bool {
        self.kind == RoomKind::Room && !self.is_exit
    }
}

/// A door between two rooms.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSpec {
    pub from: String,
    pub to: String,
    /// Centre of the opening.  When absent the builder uses the midpoint of
    /// the boundary the two rectangles share.
    #[serde(default)]
    pub door: Option<Point>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutSpec {
    #[serde(default)]
    pub name: String,
    pub rooms: Vec<RoomSpec>,
    #[serde(default)]
    pub connections: Vec<ConnectionSpec>,
    /// Id of the room where the fire starts.
    pub fire_origin: String,
    pub responder_starts: Vec<Point>,
}

impl LayoutSpec {
    pub fn total_occupants(&self) -> u32 {
        self.rooms.iter().filter(|r| !r.is_exit).map(|r| r.occupants).sum()
    }

    /// A row of `offices` 6 m × 6 m offices north of a 3 m hallway, with a
    /// 4 m exit lobby at the west end of the hallway.
    ///
    /// ```text
    ///          ┌──────┬──────┬──────┐
    ///          │ off0 │ off1 │ off2 │   fire starts in the last office
    ///   ┌──────┼─ ── ─┴─ ── ─┴─ ── ─┤
    ///   │ exit │      hallway       │
    ///   └──────┴────────────────────┘
    /// ```
    ///
    /// One responder start per `responders`, all inside the exit lobby.
    pub fn office_row(offices: usize, occupants_per_office: u32, responders: usize) -> Self {
        Self::office_row_with(offices, responders, |_| occupants_per_office)
    }

    /// Like [`office_row`](Self::office_row) but with each office's occupant
    /// count drawn uniformly from `0..=max_occupants`.
    pub fn randomized(
        offices: usize,
        max_occupants: u32,
        responders: usize,
        rng: &mut SimRng,
    ) -> Self {
        let mut layout = Self::office_row_with(offices, responders, |_| rng.gen_range(0..=max_occupants));
        layout.name = format!("randomized-{offices}");
        layout
    }

    fn office_row_with(
        offices: usize,
        responders: usize,
        mut occupants: impl FnMut(usize) -> u32,
    ) -> Self {
        const OFFICE: f32 = 6.0;
        const HALL: f32 = 3.0;
        const LOBBY: f32 = 4.0;

        let offices = offices.max(1);
        let hall_len = OFFICE * offices as f32;
        let hall_y = OFFICE + HALL / 2.0;

        let mut rooms = vec![
            RoomSpec {
                id: "exit".into(),
                x: LOBBY / 2.0,
                y: hall_y,
                width: LOBBY,
                height: HALL,
                occupants: 0,
                is_exit: true,
                kind: RoomKind::Hallway,
            },
            RoomSpec {
                id: "hallway".into(),
                x: LOBBY + hall_len / 2.0,
                y: hall_y,
                width: hall_len,
                height: HALL,
                occupants: 0,
                is_exit: false,
                kind: RoomKind::Hallway,
            },
        ];
        let mut connections = vec![ConnectionSpec {
            from: "exit".into(),
            to: "hallway".into(),
            door: None,
        }];
        for i in 0..offices {
            let id = format!("office{i}");
            rooms.push(RoomSpec {
                id: id.clone(),
                x: LOBBY + OFFICE * (i as f32 + 0.5),
                y: OFFICE / 2.0,
                width: OFFICE,
                height: OFFICE,
                occupants: occupants(i),
                is_exit: false,
                kind: RoomKind::Room,
            });
            connections.push(ConnectionSpec { from: "hallway".into(), to: id, door: None });
        }

        let responder_starts = (0..responders.max(1))
            .map(|k| Point::new(1.0 + (k % 3) as f32, hall_y - 1.0 + (k / 3 % 3) as f32))
            .collect();

        Self {
            name: format!("office-row-{offices}"),
            fire_origin: format!("office{}", offices - 1),
            rooms,
            connections,
            responder_starts,
        }
    }
}
