//! # Record schemas
//!
//! Each sample file holds one kind of record (detections, tracklets or objects). A [`Schema`]
//! is the value object describing one kind: its ordered field names, a short description of
//! every field, and the name of the primary-key field.
//!
//! Schemas are passed explicitly to the parser and to the ingestion routines, so a
//! detection file can never be validated against the tracklet field set by accident.
//!
//! ## Canonical header
//!
//! Sample files written by this crate start with a header listing the fields sorted
//! alphabetically (byte order, so upper-case names come first):
//!
//! ```text
//! # isNEO , objectID , objectType , orbit_AP , orbit_LAN , orbit_TP , orbit_e , orbit_i , orbit_q
//! ```
//!
//! When reading, the header may list the fields in any order; it only has to contain exactly
//! the expected set.
use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;

/// Separator placed between fields of the header and data lines written by this crate.
pub const FIELD_SEPARATOR: &str = " , ";

/// The three kinds of records found in the sample data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    Detection,
    Tracklet,
    Object,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Detection => write!(f, "detection"),
            RecordKind::Tracklet => write!(f, "tracklet"),
            RecordKind::Object => write!(f, "object"),
        }
    }
}

/// Name and human description of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub description: &'static str,
}

/// Fixed, ordered field set of one record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub kind: RecordKind,
    /// Name of the primary-key field (unique within the file).
    pub key: &'static str,
    pub fields: &'static [FieldDef],
}

const fn field(name: &'static str, description: &'static str) -> FieldDef {
    FieldDef { name, description }
}

pub const DETECTION_SCHEMA: Schema = Schema {
    kind: RecordKind::Detection,
    key: "detID",
    fields: &[
        field("detID", "Unique Detection ID"),
        field("trkID", "Unique Tracklet ID"),
        field("timeUTC", "Time of each observation [JDUTC]"),
        field(
            "Obs_X",
            "X-Position of the Observatory w.r.t. the Sun at the time of detection. Ecliptic coordinate Frame. [au]",
        ),
        field(
            "Obs_Y",
            "Y-Position of the Observatory w.r.t. the Sun at the time of detection. Ecliptic coordinate Frame. [au]",
        ),
        field(
            "Obs_Z",
            "Z-Position of the Observatory w.r.t. the Sun at the time of detection. Ecliptic coordinate Frame. [au]",
        ),
        field(
            "UV_X",
            "X-Component of unit vector from the observatory to the detection position. Ecliptic coordinate Frame.",
        ),
        field(
            "UV_Y",
            "Y-Component of unit vector from the observatory to the detection position. Ecliptic coordinate Frame.",
        ),
        field(
            "UV_Z",
            "Z-Component of unit vector from the observatory to the detection position. Ecliptic coordinate Frame.",
        ),
        field("Vmag", "Equivalent V-band magnitude of the detection"),
        field(
            "obsCode",
            "A unique code to label the observatory which undertook the detection",
        ),
        field(
            "eclipticLat",
            "Latitude of the observation from the plane of the ecliptic [radians]",
        ),
        field(
            "solarElong",
            "Angular separation between the Sun and the detection, with Earth as the reference point [radians]",
        ),
    ],
};

pub const TRACKLET_SCHEMA: Schema = Schema {
    kind: RecordKind::Tracklet,
    key: "trkID",
    fields: &[
        field("trkID", "Unique Tracklet ID"),
        field(
            "objectID",
            "Unique Object ID (enables labelling of object-type for known objects)",
        ),
        field(
            "vecAngSepn",
            "Vector of angular separations between adjacent observations [radians]",
        ),
        field(
            "vecAngRate",
            "Vector of angular rates between adjacent observations [radians / s]",
        ),
        field(
            "meanAngRate",
            "Mean angular rate for the entire tracklet [radians / s]",
        ),
        field("rms", "RMS deviation from best-fit straight line"),
    ],
};

pub const OBJECT_SCHEMA: Schema = Schema {
    kind: RecordKind::Object,
    key: "objectID",
    fields: &[
        field("objectID", "Unique Object ID"),
        field("isNEO", "Label whether a known object is an NEO [boolean]"),
        field(
            "objectType",
            "Sub-classification of object into various types [integer]",
        ),
        field(
            "orbit_q",
            "Nominal/best-fit Keplerian orbit for the object: pericenter distance [au]",
        ),
        field(
            "orbit_e",
            "Nominal/best-fit Keplerian orbit for the object: eccentricity",
        ),
        field(
            "orbit_i",
            "Nominal/best-fit Keplerian orbit for the object: inclination [rad]",
        ),
        field(
            "orbit_AP",
            "Nominal/best-fit Keplerian orbit for the object: arg. of peri. [rad]",
        ),
        field(
            "orbit_LAN",
            "Nominal/best-fit Keplerian orbit for the object: long. asc. node [rad]",
        ),
        field(
            "orbit_TP",
            "Nominal/best-fit Keplerian orbit for the object: time peri. pass [JDUTC]",
        ),
    ],
};

impl Schema {
    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Description of a field, if the field belongs to this schema.
    pub fn describe(&self, name: &str) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.description)
    }

    /// Field names sorted alphabetically; the column order of every file this crate writes.
    pub fn canonical_fields(&self) -> Vec<&'static str> {
        self.field_names().sorted().collect()
    }

    /// Header line (without trailing newline) for a file of this record kind.
    pub fn canonical_header(&self) -> String {
        format!("# {}", self.canonical_fields().join(FIELD_SEPARATOR))
    }

    /// True if `header` lists exactly the fields of this schema, in any order.
    pub fn matches_header<S: AsRef<str>>(&self, header: &[S]) -> bool {
        if header.len() != self.len() {
            return false;
        }
        let found: BTreeSet<&str> = header.iter().map(|h| h.as_ref()).collect();
        let expected: BTreeSet<&str> = self.field_names().collect();
        found == expected
    }

    /// Position of `name` inside a header that matched this schema.
    pub fn index_of<S: AsRef<str>>(header: &[S], name: &str) -> Option<usize> {
        header.iter().position(|h| h.as_ref() == name)
    }
}
