//! Arrow kinds and their marker definitions.
//!
//! Every arrow kind has a head marker (drawn at the end of a stroke) and a
//! tail marker (drawn at its start). The renderer emits the full marker table
//! ahead of the primitives, whether or not any graphic references it.

use std::str::FromStr;

use crate::error::Error;

/// Arrow decorations that can be attached to stroke endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowKind {
    StickArrow,
    Arrow,
    UMLInheritance,
    FilledBall,
}

impl ArrowKind {
    /// Every arrow kind, in marker-table order.
    pub const ALL: [Self; 4] = [
        Self::StickArrow,
        Self::Arrow,
        Self::UMLInheritance,
        Self::FilledBall,
    ];

    /// Returns the name of the arrow kind as written in documents.
    pub fn name(self) -> &'static str {
        match self {
            Self::StickArrow => "StickArrow",
            Self::Arrow => "Arrow",
            Self::UMLInheritance => "UMLInheritance",
            Self::FilledBall => "FilledBall",
        }
    }

    fn marker_base(self) -> &'static str {
        match self {
            Self::StickArrow => "stick_arrow",
            Self::Arrow => "arrow",
            Self::UMLInheritance => "uml_inheritance",
            Self::FilledBall => "filled_ball",
        }
    }

    /// Returns the marker id drawn at the end of a stroke.
    ///
    /// # Examples
    ///
    /// ```
    /// use graffle_core::draw::ArrowKind;
    ///
    /// let kind: ArrowKind = "StickArrow".parse().unwrap();
    /// assert_eq!(kind.head_marker_id(), "stick_arrow_head");
    /// assert_eq!(kind.tail_marker_id(), "stick_arrow_tail");
    /// ```
    pub fn head_marker_id(self) -> String {
        format!("{}_head", self.marker_base())
    }

    /// Returns the marker id drawn at the start of a stroke.
    pub fn tail_marker_id(self) -> String {
        format!("{}_tail", self.marker_base())
    }

    /// Whether the marker outline is painted solid black.
    fn filled(self) -> bool {
        matches!(self, Self::StickArrow | Self::UMLInheritance)
    }
}

impl FromStr for ArrowKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| Error::UnsupportedArrow(s.to_string()))
    }
}

/// Which end of a stroke a marker decorates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerEnd {
    Head,
    Tail,
}

/// A marker definition emitted ahead of a sheet's primitives.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDefinition {
    id: String,
    kind: ArrowKind,
    end: MarkerEnd,
    ref_x: f64,
    ref_y: f64,
    width: f64,
    height: f64,
    path: &'static str,
    filled: bool,
}

impl MarkerDefinition {
    fn new(kind: ArrowKind, end: MarkerEnd) -> Self {
        let (id, ref_x, path) = match end {
            MarkerEnd::Head => (kind.head_marker_id(), 10.0, "M2,2 L10,6 L2,10 L6,6 z"),
            MarkerEnd::Tail => (kind.tail_marker_id(), 2.0, "M8,2 L0,6 L8,10 L4,6 z"),
        };

        Self {
            id,
            kind,
            end,
            ref_x,
            ref_y: 6.0,
            width: 10.0,
            height: 10.0,
            path,
            filled: kind.filled(),
        }
    }

    /// Returns the head and tail marker of every arrow kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use graffle_core::draw::MarkerDefinition;
    ///
    /// let markers = MarkerDefinition::all();
    /// assert_eq!(markers.len(), 8);
    /// assert_eq!(markers[0].id(), "stick_arrow_head");
    /// ```
    pub fn all() -> Vec<Self> {
        ArrowKind::ALL
            .into_iter()
            .flat_map(|kind| {
                [
                    Self::new(kind, MarkerEnd::Head),
                    Self::new(kind, MarkerEnd::Tail),
                ]
            })
            .collect()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ArrowKind {
        self.kind
    }

    pub fn end(&self) -> MarkerEnd {
        self.end
    }

    pub fn ref_x(&self) -> f64 {
        self.ref_x
    }

    pub fn ref_y(&self) -> f64 {
        self.ref_y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the marker outline as SVG path data.
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Whether the outline carries an explicit black fill.
    pub fn filled(&self) -> bool {
        self.filled
    }
}
