//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! ARE files describe an area's static properties: name, fog, camera style,
//! rest rules and the area-level scripts.

use getset::{Getters, MutGetters, Setters};

use crate::error::Result;
use crate::files::ResRef;
use crate::files::gff::{Gff, GffField, LocalizedString};

use super::Blueprint;

/// An area properties file.
#[derive(Clone, Debug, Default, PartialEq, Getters, MutGetters, Setters)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Are {
    tag: String,
    name: LocalizedString,

    /// Row of `camerastyle.2da`.
    camera_style: i32,

    /// Environment map applied to shiny surfaces.
    default_envmap: ResRef,

    /// Fog parameters.
    fog_enabled: bool,
    fog_near: f32,
    fog_far: f32,
    sun_fog_color: u32,

    /// Ambient and diffuse sun light colours.
    sun_ambient_color: u32,
    sun_diffuse_color: u32,

    /// If shadows are rendered from the sun.
    sun_shadows: bool,

    /// Wind strength over the area.
    wind_power: i32,

    /// Rest rules.
    no_rest: bool,
    no_hang_back: bool,
    player_vs_player: u8,

    /// Stealth and unescapable flags.
    stealth_xp: bool,
    unescapable: bool,

    /// Grass cover.
    grass_texture: ResRef,
    grass_density: f32,
    grass_size: f32,

    /// Event scripts.
    on_enter: ResRef,
    on_exit: ResRef,
    on_heartbeat: ResRef,
    on_user_defined: ResRef,

    /// Toolset comment. Deprecated, only written on demand.
    comment: String,
}

impl Blueprint for Are {

    const SIGNATURE: &'static str = "ARE ";

    fn construct(gff: &Gff) -> Result<Self> {
        let root = gff.root();

        Ok(Self {
            tag: root.string_or_default("Tag"),
            name: root.locstring_or_default("Name"),
            camera_style: root.i32_or("CameraStyle", 0),
            default_envmap: root.resref_or_default("DefaultEnvMap"),
            fog_enabled: root.u8_or("SunFogOn", 0) != 0,
            fog_near: root.f32_or("SunFogNear", 0.0),
            fog_far: root.f32_or("SunFogFar", 0.0),
            sun_fog_color: root.u32_or("SunFogColor", 0),
            sun_ambient_color: root.u32_or("SunAmbientColor", 0),
            sun_diffuse_color: root.u32_or("SunDiffuseColor", 0),
            sun_shadows: root.u8_or("SunShadows", 0) != 0,
            wind_power: root.i32_or("WindPower", 0),
            no_rest: root.u8_or("NoRest", 0) != 0,
            no_hang_back: root.u8_or("NoHangBack", 0) != 0,
            player_vs_player: root.u8_or("PlayerVsPlayer", 0),
            stealth_xp: root.u8_or("StealthXPEnabled", 0) != 0,
            unescapable: root.u8_or("Unescapable", 0) != 0,
            grass_texture: root.resref_or_default("Grass_TexName"),
            grass_density: root.f32_or("Grass_Density", 0.0),
            grass_size: root.f32_or("Grass_QuadSize", 0.0),
            on_enter: root.resref_or_default("OnEnter"),
            on_exit: root.resref_or_default("OnExit"),
            on_heartbeat: root.resref_or_default("OnHeartbeat"),
            on_user_defined: root.resref_or_default("OnUserDefined"),
            comment: root.string_or_default("Comments"),
        })
    }

    fn dismantle(&self, use_deprecated: bool) -> Result<Gff> {
        let mut gff = Gff::new(Self::SIGNATURE);
        let root = gff.root_mut();

        root.insert("Tag", GffField::String(self.tag.to_owned()))?;
        root.insert("Name", GffField::LocalizedString(self.name.clone()))?;
        root.insert("CameraStyle", GffField::I32(self.camera_style))?;
        root.insert("DefaultEnvMap", GffField::ResRef(self.default_envmap.clone()))?;
        root.insert("SunFogOn", GffField::U8(self.fog_enabled as u8))?;
        root.insert("SunFogNear", GffField::F32(self.fog_near))?;
        root.insert("SunFogFar", GffField::F32(self.fog_far))?;
        root.insert("SunFogColor", GffField::U32(self.sun_fog_color))?;
        root.insert("SunAmbientColor", GffField::U32(self.sun_ambient_color))?;
        root.insert("SunDiffuseColor", GffField::U32(self.sun_diffuse_color))?;
        root.insert("SunShadows", GffField::U8(self.sun_shadows as u8))?;
        root.insert("WindPower", GffField::I32(self.wind_power))?;
        root.insert("NoRest", GffField::U8(self.no_rest as u8))?;
        root.insert("NoHangBack", GffField::U8(self.no_hang_back as u8))?;
        root.insert("PlayerVsPlayer", GffField::U8(self.player_vs_player))?;
        root.insert("StealthXPEnabled", GffField::U8(self.stealth_xp as u8))?;
        root.insert("Unescapable", GffField::U8(self.unescapable as u8))?;
        root.insert("Grass_TexName", GffField::ResRef(self.grass_texture.clone()))?;
        root.insert("Grass_Density", GffField::F32(self.grass_density))?;
        root.insert("Grass_QuadSize", GffField::F32(self.grass_size))?;
        root.insert("OnEnter", GffField::ResRef(self.on_enter.clone()))?;
        root.insert("OnExit", GffField::ResRef(self.on_exit.clone()))?;
        root.insert("OnHeartbeat", GffField::ResRef(self.on_heartbeat.clone()))?;
        root.insert("OnUserDefined", GffField::ResRef(self.on_user_defined.clone()))?;

        if use_deprecated {
            root.insert("Comments", GffField::String(self.comment.to_owned()))?;
        }

        Ok(gff)
    }
}
