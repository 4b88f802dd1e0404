//! Lookups of the reference entries a selection points at.
//!
//! Ids that the catalogs do not know resolve to `None`; callers treat that the
//! same as "nothing selected".

use charforge_domain::{
    BackgroundDef, ClassDef, GuidedSelection, RaceDef, ReferenceCatalogs, SubraceDef, TraitDef,
};

pub(crate) fn class<'a>(
    selection: &GuidedSelection,
    catalogs: &'a ReferenceCatalogs,
) -> Option<&'a ClassDef> {
    selection
        .class_id
        .as_ref()
        .and_then(|id| catalogs.classes.get(id))
}

pub(crate) fn race<'a>(
    selection: &GuidedSelection,
    catalogs: &'a ReferenceCatalogs,
) -> Option<&'a RaceDef> {
    selection
        .race_id
        .as_ref()
        .and_then(|id| catalogs.races.get(id))
}

/// The chosen subrace, only when it belongs to the chosen race.
pub(crate) fn subrace<'a>(
    selection: &GuidedSelection,
    catalogs: &'a ReferenceCatalogs,
) -> Option<&'a SubraceDef> {
    let race = race(selection, catalogs)?;
    selection
        .subrace_id
        .as_ref()
        .and_then(|id| catalogs.subraces.get(id))
        .filter(|subrace| subrace.race == race.id)
}

pub(crate) fn background<'a>(
    selection: &GuidedSelection,
    catalogs: &'a ReferenceCatalogs,
) -> Option<&'a BackgroundDef> {
    selection
        .background_id
        .as_ref()
        .and_then(|id| catalogs.backgrounds.get(id))
}

/// Traits of the race followed by traits of the subrace.
pub(crate) fn traits<'a>(
    selection: &GuidedSelection,
    catalogs: &'a ReferenceCatalogs,
) -> Vec<&'a TraitDef> {
    let race_traits = race(selection, catalogs)
        .map(|race| race.traits.as_slice())
        .unwrap_or(&[]);
    let subrace_traits = subrace(selection, catalogs)
        .map(|subrace| subrace.traits.as_slice())
        .unwrap_or(&[]);

    race_traits
        .iter()
        .chain(subrace_traits)
        .filter_map(|id| catalogs.traits.get(id))
        .collect()
}
