//! End-to-end catalog matching through the public API: manifest text in,
//! download plan out.

use dataset_downloader::fetcher::catalog::{
    match_catalog, route_subdir, DEFAULT_SUBDIR, DELIVERY_SUBDIR,
};
use dataset_downloader::fetcher::dataverse::{CatalogEntry, DatasetCatalog};
use dataset_downloader::fetcher::manifest::WantedManifest;

fn catalog(entries: &[(&str, u64)]) -> DatasetCatalog {
    DatasetCatalog::new(
        entries
            .iter()
            .map(|(name, id)| CatalogEntry {
                filename: name.to_string(),
                id: *id,
            })
            .collect(),
    )
}

/// A bullet-decorated manifest wanting one delivery file, one regular file,
/// and one file the catalog does not have: the plan selects the two matches
/// with correct routing and reports the miss.
#[test]
fn wanted_list_resolves_to_routed_download_plan() {
    let manifest = WantedManifest::parse(
        "* A_DELIVERY_Thu_Nov_18.bag\n\
         - A_Jackal_AHG_Library.bag\n\
         * A_Spot_Union_Building.bag\n",
    )
    .unwrap();

    let catalog = catalog(&[
        ("A_DELIVERY_Thu_Nov_18.bag", 101),
        ("A_Jackal_AHG_Library.bag", 102),
        ("B_Unrelated_Recording.bag", 103),
    ]);

    let plan = match_catalog(&manifest, &catalog);

    assert_eq!(plan.selected.len(), 2);
    assert_eq!(plan.selected[0].filename, "A_DELIVERY_Thu_Nov_18.bag");
    assert_eq!(plan.selected[0].id, 101);
    assert_eq!(plan.selected[0].subdir, DELIVERY_SUBDIR);
    assert_eq!(plan.selected[1].subdir, DEFAULT_SUBDIR);
    assert_eq!(plan.not_found, vec!["A_Spot_Union_Building.bag"]);
}

/// Every manifest entry is either selected or reported missing; nothing is
/// silently dropped.
#[test]
fn plan_partitions_the_manifest() {
    let manifest = WantedManifest::parse("a.bag\nb.bag\nc.bag\nd.bag\n").unwrap();
    let catalog = catalog(&[("b.bag", 1), ("d.bag", 2), ("x.bag", 3)]);

    let plan = match_catalog(&manifest, &catalog);
    assert_eq!(plan.selected.len() + plan.not_found.len(), manifest.len());

    for entry in manifest.entries() {
        let selected = plan.selected.iter().any(|f| &f.filename == entry);
        let missing = plan.not_found.contains(entry);
        assert!(selected != missing, "{entry} must appear exactly once");
    }
}

#[test]
fn routing_is_a_pure_function_of_the_filename() {
    assert_eq!(route_subdir("run_DELIVERY_1.bag"), DELIVERY_SUBDIR);
    assert_eq!(route_subdir("run_1.bag"), DEFAULT_SUBDIR);
}
