//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the blueprint layer.

use std::io::Cursor;

use crate::files::*;
use crate::files::gff::Gff;

use super::*;
use super::utm::UtmItem;

#[test]
fn test_utm_full_cycle_through_the_codec() {
    let mut utm = Utm::default();
    utm.set_resref(ResRef::new("merchant01").unwrap());
    utm.set_tag("m1".to_owned());
    utm.set_mark_up(20);
    utm.set_mark_down(10);
    utm.set_on_open_store(ResRef::new("k_on_open").unwrap());
    utm.set_can_buy(true);
    utm.set_can_sell(false);

    let mut item = UtmItem::default();
    item.set_resref(ResRef::new("g_w_blstrpstl01").unwrap());
    item.set_infinite(true);
    utm.items_mut().push(item);

    // Dismantle, encode, decode, construct: the merchant must survive intact.
    let mut gff = utm.dismantle(false).unwrap();
    let mut encoded = vec![];
    gff.encode(&mut encoded, &None).unwrap();

    let decoded = Gff::decode(&mut Cursor::new(&encoded), &None).unwrap();
    let rebuilt = Utm::construct(&decoded).unwrap();
    assert_eq!(utm, rebuilt);

    // Bit 0 is can_buy, bit 1 is can_sell.
    assert_eq!(decoded.root().u8_or("BuySellFlag", 0xFF), 0x01);
}

#[test]
fn test_utm_engine_defaults_on_missing_fields() {
    let gff = Gff::new(Utm::SIGNATURE);
    let utm = Utm::construct(&gff).unwrap();

    assert_eq!(*utm.mark_up(), 0);
    assert_eq!(*utm.mark_down(), 0);
    assert_eq!(*utm.store_gold(), -1);
    assert_eq!(*utm.identify_price(), 100);
    assert_eq!(*utm.max_buy_price(), -1);
    assert_eq!(utm.on_open_store().as_str(), "");
}

#[test]
fn test_utm_deprecated_fields_written_only_on_demand() {
    let mut utm = Utm::default();
    utm.set_comment("toolset scribbles".to_owned());

    let modern = utm.dismantle(false).unwrap();
    assert!(!modern.root().has_field("Comment"));
    assert!(!modern.root().has_field("ID"));

    let legacy = utm.dismantle(true).unwrap();
    assert!(legacy.root().has_field("Comment"));
    assert!(legacy.root().has_field("ID"));

    // Reading a legacy file tolerates them either way.
    let reread = Utm::construct(&legacy).unwrap();
    assert_eq!(reread.comment(), "toolset scribbles");
}

#[test]
fn test_utc_round_trip() {
    let mut utc = Utc::default();
    utc.set_resref(ResRef::new("n_duros01").unwrap());
    utc.set_tag("duros".to_owned());
    utc.set_appearance(17);
    utc.set_strength(14);
    utc.classes_mut().push(utc::UtcClass::new(1, 4));

    let rebuilt = Utc::construct(&utc.dismantle(false).unwrap()).unwrap();
    assert_eq!(utc, rebuilt);
}

#[test]
fn test_ute_round_trip() {
    let mut ute = Ute::default();
    ute.set_resref(ResRef::new("enc_sith01").unwrap());
    ute.set_active(true);
    ute.set_max_creatures(4);
    {
        let mut creature = ute::UteCreature::default();
        creature.set_resref(ResRef::new("n_sith01").unwrap());
        creature.set_challenge_rating(4.0);
        ute.creatures_mut().push(creature);
    }

    let rebuilt = Ute::construct(&ute.dismantle(false).unwrap()).unwrap();
    assert_eq!(ute, rebuilt);
}

#[test]
fn test_uti_round_trip() {
    let mut uti = Uti::default();
    uti.set_resref(ResRef::new("g_w_blstrpstl01").unwrap());
    uti.set_base_item(12);
    uti.set_cost(150);
    uti.set_identified(true);
    {
        let mut property = uti::UtiProperty::default();
        property.set_property_name(45);
        property.set_cost_value(3);
        uti.properties_mut().push(property);
    }

    let rebuilt = Uti::construct(&uti.dismantle(false).unwrap()).unwrap();
    assert_eq!(uti, rebuilt);
}

#[test]
fn test_remaining_blueprints_round_trip() {
    let mut utd = Utd::default();
    utd.set_resref(ResRef::new("door_m01").unwrap());
    utd.set_locked(true);
    utd.set_open_lock_dc(20);
    assert_eq!(utd, Utd::construct(&utd.dismantle(false).unwrap()).unwrap());

    let mut utp = Utp::default();
    utp.set_resref(ResRef::new("footlkr01").unwrap());
    utp.set_has_inventory(true);
    assert_eq!(utp, Utp::construct(&utp.dismantle(false).unwrap()).unwrap());

    let mut utt = Utt::default();
    utt.set_resref(ResRef::new("trap_m01").unwrap());
    utt.set_is_trap(true);
    utt.set_trap_disarm_dc(25);
    assert_eq!(utt, Utt::construct(&utt.dismantle(false).unwrap()).unwrap());

    let mut uts = Uts::default();
    uts.set_resref(ResRef::new("amb_wind01").unwrap());
    uts.sounds_mut().push(ResRef::new("al_wind_01").unwrap());
    assert_eq!(uts, Uts::construct(&uts.dismantle(false).unwrap()).unwrap());

    let mut utw = Utw::default();
    utw.set_resref(ResRef::new("wp_spawn01").unwrap());
    utw.set_has_map_note(true);
    assert_eq!(utw, Utw::construct(&utw.dismantle(false).unwrap()).unwrap());
}

#[test]
fn test_structural_blueprints_round_trip() {
    let mut dlg = Dlg::default();
    dlg.set_skippable(true);
    {
        let mut entry = dlg::DlgNode::default();
        entry.set_speaker("merchant".to_owned());
        let mut link = dlg::DlgLink::default();
        link.set_index(0);
        entry.links_mut().push(link);
        dlg.entries_mut().push(entry);
        dlg.replies_mut().push(dlg::DlgNode::default());

        let mut starter = dlg::DlgLink::default();
        starter.set_index(0);
        dlg.starters_mut().push(starter);
    }
    assert_eq!(dlg, Dlg::construct(&dlg.dismantle(false).unwrap()).unwrap());

    let mut jrl = Jrl::default();
    {
        let mut quest = jrl::JrlQuest::default();
        quest.set_tag("q_find_bastila".to_owned());
        let mut entry = jrl::JrlEntry::default();
        entry.set_id(10);
        entry.set_end(true);
        quest.entries_mut().push(entry);
        jrl.quests_mut().push(quest);
    }
    assert_eq!(jrl, Jrl::construct(&jrl.dismantle(false).unwrap()).unwrap());

    let mut pth = Pth::default();
    {
        let mut point = pth::PthPoint::default();
        point.set_connection_count(1);
        point.set_x(4.5);
        pth.points_mut().push(point);
        pth.connections_mut().push(0);
    }
    assert_eq!(pth, Pth::construct(&pth.dismantle(false).unwrap()).unwrap());

    let mut are = Are::default();
    are.set_tag("m01aa".to_owned());
    are.set_no_rest(true);
    assert_eq!(are, Are::construct(&are.dismantle(false).unwrap()).unwrap());

    let mut git = Git::default();
    git.creatures_mut().push(git::GitInstance::new(ResRef::new("n_duros01").unwrap(), [1.0, 2.0, 0.0], 1.5));
    assert_eq!(git, Git::construct(&git.dismantle(false).unwrap()).unwrap());

    let mut ifo = Ifo::default();
    ifo.set_entry_area(ResRef::new("m01aa").unwrap());
    assert_eq!(ifo, Ifo::construct(&ifo.dismantle(false).unwrap()).unwrap());

    let mut fac = Fac::default();
    {
        let mut faction = fac::Faction::default();
        faction.set_label("Hostile_1".to_owned());
        fac.factions_mut().push(faction);
        let mut reputation = fac::Reputation::default();
        reputation.set_reputation(100);
        fac.reputations_mut().push(reputation);
    }
    assert_eq!(fac, Fac::construct(&fac.dismantle(false).unwrap()).unwrap());
}

#[test]
fn test_blueprint_signatures_reach_the_gff() {
    let utm = Utm::default();
    let gff = utm.dismantle(false).unwrap();
    assert_eq!(gff.signature(), "UTM ");

    // A GFF decoded with an expected-signature set accepts his own blueprint tag.
    let mut gff = gff;
    let mut encoded = vec![];
    gff.encode(&mut encoded, &None).unwrap();

    let expected: &[&str] = &["UTM "];
    let extra_data = DecodeableExtraData::default().set_expected_signatures(Some(expected)).clone();
    assert!(Gff::decode(&mut Cursor::new(&encoded), &Some(extra_data)).is_ok());
}
