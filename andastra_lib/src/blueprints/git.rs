//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! GIT files describe an area's dynamic layout: which blueprint instances are
//! placed where when the area loads.

use getset::{Getters, MutGetters, Setters};

use crate::error::Result;
use crate::files::ResRef;
use crate::files::gff::{Gff, GffField, GffStruct};

use super::Blueprint;

/// Struct ids the engine uses for instance list entries, per list.
const CREATURE_STRUCT_ID: i32 = 4;
const DOOR_STRUCT_ID: i32 = 8;
const PLACEABLE_STRUCT_ID: i32 = 9;
const STORE_STRUCT_ID: i32 = 11;
const WAYPOINT_STRUCT_ID: i32 = 5;

/// An area layout file.
#[derive(Clone, Debug, Default, PartialEq, Getters, MutGetters, Setters)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Git {

    /// Ambient sound volume of the area.
    ambient_volume: i32,

    /// Ambient music track rows.
    music_day: i32,
    music_night: i32,
    music_battle: i32,

    /// Placed instances, per object kind.
    creatures: Vec<GitInstance>,
    doors: Vec<GitInstance>,
    placeables: Vec<GitInstance>,
    stores: Vec<GitInstance>,
    waypoints: Vec<GitInstance>,
}

/// One placed blueprint instance.
#[derive(Clone, Debug, Default, PartialEq, Getters, Setters)]
#[getset(get = "pub", set = "pub")]
pub struct GitInstance {

    /// Blueprint the instance spawns from.
    resref: ResRef,

    /// Position inside the area.
    position: [f32; 3],

    /// Facing of the instance, in radians.
    bearing: f32,
}

impl GitInstance {

    /// This function creates a new instance record.
    pub fn new(resref: ResRef, position: [f32; 3], bearing: f32) -> Self {
        Self { resref, position, bearing }
    }
}

/// This function reads one instance list.
fn construct_instances(root: &GffStruct, label: &str) -> Vec<GitInstance> {
    root.list_or_default(label)
        .iter()
        .map(|entry| GitInstance {
            resref: entry.resref_or_default("TemplateResRef"),
            position: [
                entry.f32_or("XPosition", 0.0),
                entry.f32_or("YPosition", 0.0),
                entry.f32_or("ZPosition", 0.0),
            ],
            bearing: entry.f32_or("Bearing", 0.0),
        })
        .collect()
}

/// This function writes one instance list.
fn dismantle_instances(instances: &[GitInstance], struct_id: i32) -> Result<Vec<GffStruct>> {
    instances.iter()
        .map(|instance| {
            let mut entry = GffStruct::new(struct_id);
            entry.insert("TemplateResRef", GffField::ResRef(instance.resref.clone()))?;
            entry.insert("XPosition", GffField::F32(instance.position[0]))?;
            entry.insert("YPosition", GffField::F32(instance.position[1]))?;
            entry.insert("ZPosition", GffField::F32(instance.position[2]))?;
            entry.insert("Bearing", GffField::F32(instance.bearing))?;
            Ok(entry)
        })
        .collect()
}

impl Blueprint for Git {

    const SIGNATURE: &'static str = "GIT ";

    fn construct(gff: &Gff) -> Result<Self> {
        let root = gff.root();

        let properties = root.list_or_default("AreaProperties");
        let properties = properties.first();

        Ok(Self {
            ambient_volume: properties.map(|properties| properties.i32_or("AmbientSndDayVol", 0)).unwrap_or(0),
            music_day: properties.map(|properties| properties.i32_or("MusicDay", 0)).unwrap_or(0),
            music_night: properties.map(|properties| properties.i32_or("MusicNight", 0)).unwrap_or(0),
            music_battle: properties.map(|properties| properties.i32_or("MusicBattle", 0)).unwrap_or(0),
            creatures: construct_instances(root, "Creature List"),
            doors: construct_instances(root, "Door List"),
            placeables: construct_instances(root, "Placeable List"),
            stores: construct_instances(root, "StoreList"),
            waypoints: construct_instances(root, "WaypointList"),
        })
    }

    fn dismantle(&self, _use_deprecated: bool) -> Result<Gff> {
        let mut gff = Gff::new(Self::SIGNATURE);
        let root = gff.root_mut();

        let mut properties = GffStruct::new(100);
        properties.insert("AmbientSndDayVol", GffField::I32(self.ambient_volume))?;
        properties.insert("MusicDay", GffField::I32(self.music_day))?;
        properties.insert("MusicNight", GffField::I32(self.music_night))?;
        properties.insert("MusicBattle", GffField::I32(self.music_battle))?;
        root.insert("AreaProperties", GffField::List(vec![properties]))?;

        root.insert("Creature List", GffField::List(dismantle_instances(&self.creatures, CREATURE_STRUCT_ID)?))?;
        root.insert("Door List", GffField::List(dismantle_instances(&self.doors, DOOR_STRUCT_ID)?))?;
        root.insert("Placeable List", GffField::List(dismantle_instances(&self.placeables, PLACEABLE_STRUCT_ID)?))?;
        root.insert("StoreList", GffField::List(dismantle_instances(&self.stores, STORE_STRUCT_ID)?))?;
        root.insert("WaypointList", GffField::List(dismantle_instances(&self.waypoints, WAYPOINT_STRUCT_ID)?))?;

        Ok(gff)
    }
}
