// src/readers/sources.rs

//! Helpers to choose which sources a run queries.

#[allow(unused_imports)]
use ::si_trace_print::{
    defn,
    defo,
    defx,
    defñ,
};

use crate::common::{
    SourceName,
    SourceNames,
};
use crate::readers::session::{
    Session,
    SessionError,
};

/// Split a user-passed list of source names on `,` and `;`.
///
/// Surrounding whitespace is dropped from each name and empty entries are
/// dropped entirely, so `"System, Application,"` holds two names.
pub fn split_source_list(list: &str) -> SourceNames {
    list.split([',', ';'])
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(SourceName::from)
        .collect()
}

/// The source names a run queries: the names in `list`, or every name the
/// session holds when no list was given. A non-empty `list` is authoritative
/// even when it holds no usable name, so `","` queries nothing. Either way
/// the names are sorted; the merged stream breaks timestamp ties by this
/// query order.
pub fn resolve_source_names<S: Session>(
    session: &S,
    list: &str,
) -> Result<SourceNames, SessionError> {
    defn!("({:?})", list);
    let mut names: SourceNames = if list.is_empty() {
        defo!("no list given; take all names of the session");
        session.list_source_names()?
    } else {
        split_source_list(list)
    };
    names.sort();
    defx!("return {} source names", names.len());

    Result::Ok(names)
}
