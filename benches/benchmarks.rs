// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use repo_digest::{Record, group_records, parse_targets, render};

const LANGUAGES: [&str; 6] = ["Rust", "Go", "TypeScript", "", "C++", "Emacs Lisp"];

fn records(count: usize,) -> Vec<Record,>
{
    (0..count)
        .map(|index| Record {
            full_name: format!("owner{}/repo-{index}", index % 37),
            name: format!("repo-{index}"),
            owner: format!("owner{}", index % 37),
            language: LANGUAGES[index % LANGUAGES.len()].to_owned(),
            description: format!("Repository number {index}\nwith a second line"),
            url: format!("https://github.com/owner{}/repo-{index}", index % 37),
            stars: (index as u64) * 17,
            forks: (index as u64) * 3,
            pushed_at: None,
        },)
        .collect()
}

fn benchmark_group_and_render(c: &mut Criterion,)
{
    let mut group = c.benchmark_group("group_and_render",);
    for size in [100_usize, 1_000, 5_000] {
        let input = records(size,);
        group.bench_with_input(BenchmarkId::from_parameter(size,), &input, |b, input| {
            b.iter(|| {
                let groups = group_records(black_box(input.clone(),),);
                black_box(render(&groups,),)
            },)
        },);
    }
    group.finish();
}

fn benchmark_parse_targets(c: &mut Criterion,)
{
    let mut yaml = String::new();
    for index in 0..200 {
        let kind = if index % 2 == 0 { "user" } else { "org" };
        yaml.push_str(&format!(
            "- name: account{index}\n  userType: {kind}\n  file: digests/account{index}.md\n"
        ),);
    }

    c.bench_function("parse_targets_200", |b| {
        b.iter(|| parse_targets(black_box(&yaml,),).expect("parse failed",),)
    },);
}

criterion_group!(benches, benchmark_group_and_render, benchmark_parse_targets);
criterion_main!(benches);
