// benches/grouping.rs
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use isl_scrape::config::Curation;
use isl_scrape::config::consts::ALPHABET;
use isl_scrape::config::options::ReconcileOptions;
use isl_scrape::dict::{self, Playlist, WordGroups};

const TAIL: &str = " בשפת הסימנים הישראלית - המכון לקידום החרש";

/// Synthetic dictionary: `words` base words built from the alphabet, each with up to
/// three numbered variants.
fn synthetic_pairs(words: usize) -> Vec<(String, String)> {
    let mut out = Vec::with_capacity(words * 3);
    let mut id = 1u32;
    for w in 0..words {
        let base: String = [w % 22, (w / 22) % 22, (w / 484) % 22]
            .iter()
            .map(|&i| ALPHABET[i])
            .collect();
        for variant in 1..=(w % 3 + 1) {
            out.push((id.to_string(), format!("{base} ({variant})")));
            id += 1;
        }
    }
    out
}

fn synthetic_playlists(groups: &WordGroups, per_playlist: usize) -> Vec<Playlist> {
    let titles: Vec<&String> = groups.groups.keys().collect();
    titles
        .chunks(per_playlist)
        .enumerate()
        .map(|(n, chunk)| Playlist {
            id: format!("PL{n}"),
            title: format!("מילון שפת הסימנים - קטגוריה {n}"),
            videos: chunk.iter().map(|t| format!("\"{t}\"{TAIL}")).collect(),
        })
        .collect()
}

fn bench_grouping(c: &mut Criterion) {
    let curation = Curation::builtin().unwrap();
    let pairs = synthetic_pairs(5_000);

    c.bench_function("ingest_and_group", |b| {
        b.iter(|| {
            let entries = dict::ingest(black_box(pairs.clone()), &curation.corrections);
            let (entries, _) = dict::exclude(entries, &curation.excluded_ids);
            black_box(dict::group(&entries).len())
        })
    });

    let entries = dict::ingest(pairs.clone(), &curation.corrections);
    let groups = dict::group(&entries);
    let playlists = synthetic_playlists(&groups, 60);
    let opts = ReconcileOptions::default();

    c.bench_function("reconcile", |b| {
        b.iter(|| {
            let recon =
                dict::reconcile(black_box(&playlists), black_box(&groups), &curation, &opts);
            black_box(recon.categories.len())
        })
    });
}

criterion_group!(benches, bench_grouping);
criterion_main!(benches);
