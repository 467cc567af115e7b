//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! PTH files describe pathfinding graphs: waypoint positions plus a shared
//! connection table.
//!
//! The field labels carry the original toolset's spelling (`Conections`),
//! which the engine expects verbatim.

use getset::{Getters, MutGetters, Setters};

use crate::error::Result;
use crate::files::gff::{Gff, GffField, GffStruct};

use super::Blueprint;

/// Struct id the engine uses for path structs.
const PATH_STRUCT_ID: i32 = 0;

/// A pathfinding graph.
#[derive(Clone, Debug, Default, PartialEq, Getters, MutGetters, Setters)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Pth {

    /// The waypoints of the graph.
    points: Vec<PthPoint>,

    /// The flattened connection table points index into.
    connections: Vec<u32>,
}

/// One waypoint of a pathfinding graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Getters, Setters)]
#[getset(get = "pub", set = "pub")]
pub struct PthPoint {

    /// How many connections the point owns, and where his run starts.
    connection_count: u32,
    first_connection: u32,

    /// Position of the point, on the area's ground plane.
    x: f32,
    y: f32,
}

impl Blueprint for Pth {

    const SIGNATURE: &'static str = "PTH ";

    fn construct(gff: &Gff) -> Result<Self> {
        let root = gff.root();

        let points = root.list_or_default("Path_Points")
            .iter()
            .map(|entry| PthPoint {
                connection_count: entry.u32_or("Conections", 0),
                first_connection: entry.u32_or("First_Conection", 0),
                x: entry.f32_or("X", 0.0),
                y: entry.f32_or("Y", 0.0),
            })
            .collect();

        let connections = root.list_or_default("Path_Conections")
            .iter()
            .map(|entry| entry.u32_or("Destination", 0))
            .collect();

        Ok(Self {
            points,
            connections,
        })
    }

    fn dismantle(&self, _use_deprecated: bool) -> Result<Gff> {
        let mut gff = Gff::new(Self::SIGNATURE);
        let root = gff.root_mut();

        let points = self.points.iter()
            .map(|point| {
                let mut entry = GffStruct::new(PATH_STRUCT_ID);
                entry.insert("Conections", GffField::U32(point.connection_count))?;
                entry.insert("First_Conection", GffField::U32(point.first_connection))?;
                entry.insert("X", GffField::F32(point.x))?;
                entry.insert("Y", GffField::F32(point.y))?;
                Ok(entry)
            })
            .collect::<Result<Vec<_>>>()?;
        root.insert("Path_Points", GffField::List(points))?;

        let connections = self.connections.iter()
            .map(|destination| {
                let mut entry = GffStruct::new(PATH_STRUCT_ID);
                entry.insert("Destination", GffField::U32(*destination))?;
                Ok(entry)
            })
            .collect::<Result<Vec<_>>>()?;
        root.insert("Path_Conections", GffField::List(connections))?;

        Ok(gff)
    }
}
