// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Full document assembly: header, rendered body, and license footer.

use crate::{
    config::{Target, TargetKind},
    group::group_records,
    record::Record,
    render::render,
};

/// Builds the header naming the total record count and, for organizations,
/// the organization itself.
pub fn header(target: &Target, total: usize,) -> String
{
    match target.kind {
        TargetKind::User => format!(
            "# Starred Repositories\n\nA curated list of {total} starred repositories, grouped \
             by primary language.\n\n## Contents\n\n"
        ),
        TargetKind::Organization => format!(
            "# {org} Repositories\n\nAll {total} repositories owned by \
             [{org}](https://github.com/{org}), grouped by primary language.\n\n## Contents\n\n",
            org = target.name
        ),
    }
}

/// Builds the license footer attributing the document to `licensee`.
pub fn license_footer(licensee: &str,) -> String
{
    format!(
        "## License\n\n[![CC0](https://licensebuttons.net/p/zero/1.0/88x31.png)](https://creativecommons.org/publicdomain/zero/1.0/)\n\nTo \
         the extent possible under law, [{licensee}](https://github.com/{licensee}) has waived \
         all copyright and related or neighboring rights to this work.\n"
    )
}

/// Groups, renders, and frames `records` for `target`.
pub fn compose_document(target: &Target, records: Vec<Record,>, licensee: &str,) -> String
{
    let total = records.len();
    let body = render(&group_records(records,),);

    let mut document = header(target, total,);
    document.push_str(&body,);
    document.push_str(&license_footer(licensee,),);
    document
}
