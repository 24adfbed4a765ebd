//! Hierarchical label reconstruction


use graphics_error_scraper::{reconstruct_path, Pacing};
use mock_surface::{fast_options, MockSurface};

#[tokio::test]
async fn test_path_is_root_first() {
    let surface = MockSurface::new();
    let region = surface.area("Region", None);
    let district = surface.area("District", Some(region));
    let site = surface.leaf("Site", Some(district));
    surface.self_parent(region);

    let pacing = Pacing::new(fast_options());
    let path = reconstruct_path(&surface, &pacing, MockSurface::handle(site))
        .await
        .unwrap();

    assert_eq!(path, "Region / District / Site");
}

#[tokio::test]
async fn test_root_without_parent_stops_the_walk() {
    let surface = MockSurface::new();
    let region = surface.area("Region", None);
    let site = surface.leaf("Site", Some(region));

    let pacing = Pacing::new(fast_options());
    let path = reconstruct_path(&surface, &pacing, MockSurface::handle(site))
        .await
        .unwrap();

    assert_eq!(path, "Region / Site");
}

#[tokio::test]
async fn test_self_referencing_root_is_read_once() {
    let surface = MockSurface::new();
    let region = surface.area("Region", None);
    surface.self_parent(region);

    let pacing = Pacing::new(fast_options());
    let path = reconstruct_path(&surface, &pacing, MockSurface::handle(region))
        .await
        .unwrap();

    assert_eq!(path, "Region");
}

#[tokio::test]
async fn test_unlabeled_self_referencing_node_yields_empty_path() {
    let surface = MockSurface::new();
    let node = surface.unlabeled(None);
    surface.self_parent(node);

    let pacing = Pacing::new(fast_options());
    let path = reconstruct_path(&surface, &pacing, MockSurface::handle(node))
        .await
        .unwrap();

    assert_eq!(path, "");
}

#[tokio::test]
async fn test_unlabeled_ancestor_cuts_the_path() {
    let surface = MockSurface::new();
    let region = surface.area("Region", None);
    let wrapper = surface.unlabeled(Some(region));
    let site = surface.leaf("Site", Some(wrapper));

    let pacing = Pacing::new(fast_options());
    let path = reconstruct_path(&surface, &pacing, MockSurface::handle(site))
        .await
        .unwrap();

    assert_eq!(path, "Site");
}

#[tokio::test]
async fn test_duplicate_labels_are_kept() {
    let surface = MockSurface::new();
    let outer = surface.area("Plant", None);
    let inner = surface.area("Plant", Some(outer));
    let leaf = surface.leaf("Pump", Some(inner));

    let pacing = Pacing::new(fast_options());
    let path = reconstruct_path(&surface, &pacing, MockSurface::handle(leaf))
        .await
        .unwrap();

    assert_eq!(path, "Plant / Plant / Pump");
}
