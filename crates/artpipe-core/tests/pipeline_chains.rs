//! Full-chain resolution against fake ports.
//!
//! These tests drive the five public entry points the way the command
//! router would, with canned service data, and assert on what reaches the
//! output sink.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use artpipe_core::{
    BuildDataPort, CdnRepoDetails, ComponentTable, ComponentTablesPort, ErrataPort, ImageRecipe,
    KojiPort, OutputSink, PipelineLookups, PipelineResolver, PyxisPort, ResolveError,
    ResolveResult, Settings, UpstreamTable, VariantRef,
};

// ----------------------------------------------------------------------
// Recording sink
// ----------------------------------------------------------------------

#[derive(Default)]
struct RecordingSink {
    says: Mutex<Vec<String>>,
    monitoring: Mutex<Vec<String>>,
}

impl RecordingSink {
    fn says(&self) -> Vec<String> {
        self.says.lock().unwrap().clone()
    }

    fn monitoring(&self) -> Vec<String> {
        self.monitoring.lock().unwrap().clone()
    }

    /// The reply after the "Fetching data" acknowledgement.
    fn final_say(&self) -> String {
        self.says().last().cloned().unwrap_or_default()
    }
}

impl OutputSink for RecordingSink {
    fn say(&self, message: &str) {
        self.says.lock().unwrap().push(message.to_string());
    }

    fn monitoring_say(&self, message: &str) {
        self.monitoring.lock().unwrap().push(message.to_string());
    }

    fn snippet(&self, intro: &str, filename: &str, payload: &str) {
        self.says
            .lock()
            .unwrap()
            .push(format!("{intro} [{filename}]\n{payload}"));
    }
}

// ----------------------------------------------------------------------
// Fake ports with call counters
// ----------------------------------------------------------------------

#[derive(Default)]
struct FakeBuildData {
    recipes: HashMap<String, ImageRecipe>,
    github_repos: Vec<String>,
    distgit_repos: Vec<String>,
}

#[async_trait]
impl BuildDataPort for FakeBuildData {
    async fn image_recipe(&self, distgit: &str, version: &str) -> ResolveResult<Arc<ImageRecipe>> {
        self.recipes
            .get(distgit)
            .cloned()
            .map(Arc::new)
            .ok_or_else(|| ResolveError::DistgitNotFound {
                distgit: distgit.to_string(),
                version: version.to_string(),
            })
    }

    async fn github_repo_exists(&self, repo: &str) -> ResolveResult<bool> {
        Ok(self.github_repos.iter().any(|r| r == repo))
    }

    async fn distgit_repo_exists(&self, name: &str) -> ResolveResult<bool> {
        Ok(self.distgit_repos.iter().any(|r| r == name))
    }
}

#[derive(Default)]
struct FakeTables {
    upstream: UpstreamTable,
    components: ComponentTable,
    calls: AtomicUsize,
}

#[async_trait]
impl ComponentTablesPort for FakeTables {
    async fn upstream_table(&self, _version: &str) -> ResolveResult<Arc<UpstreamTable>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(self.upstream.clone()))
    }

    async fn component_table(&self, _version: &str) -> ResolveResult<Arc<ComponentTable>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(self.components.clone()))
    }
}

#[derive(Default)]
struct FakeKoji {
    ids: HashMap<String, i64>,
    calls: AtomicUsize,
}

#[async_trait]
impl KojiPort for FakeKoji {
    async fn package_id(&self, package: &str) -> ResolveResult<i64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.ids
            .get(package)
            .copied()
            .ok_or_else(|| ResolveError::BrewIdNotFound {
                brew: package.to_string(),
            })
    }
}

#[derive(Default)]
struct FakeErrata {
    package_tags: HashMap<String, Vec<String>>,
    repos: HashMap<String, CdnRepoDetails>,
    product_versions: HashMap<i64, i64>,
    calls: AtomicUsize,
    fail_with: Option<fn() -> ResolveError>,
}

#[async_trait]
impl ErrataPort for FakeErrata {
    async fn cdn_repos_for_package(&self, package: &str) -> ResolveResult<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(fail) = self.fail_with {
            return Err(fail());
        }
        Ok(self.package_tags.get(package).cloned().unwrap_or_default())
    }

    async fn cdn_repo_details(&self, cdn: &str) -> ResolveResult<CdnRepoDetails> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(fail) = self.fail_with {
            return Err(fail());
        }
        self.repos
            .get(cdn)
            .cloned()
            .ok_or_else(|| ResolveError::CdnNotFound {
                cdn: cdn.to_string(),
            })
    }

    async fn product_version_id(&self, variant_id: i64) -> ResolveResult<Option<i64>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.product_versions.get(&variant_id).copied())
    }
}

#[derive(Default)]
struct FakePyxis {
    packages: HashMap<String, Vec<String>>,
    ids: HashMap<String, String>,
}

#[async_trait]
impl PyxisPort for FakePyxis {
    async fn brew_packages_for_repo(&self, delivery: &str) -> ResolveResult<Vec<String>> {
        self.packages.get(delivery).cloned().ok_or_else(|| {
            ResolveError::BrewFromDeliveryNotFound {
                delivery: delivery.to_string(),
            }
        })
    }

    async fn repository_id(&self, delivery: &str) -> ResolveResult<String> {
        self.ids.get(delivery).cloned().ok_or_else(|| {
            ResolveError::DeliveryRepoUrlNotFound {
                delivery: delivery.to_string(),
            }
        })
    }
}

// ----------------------------------------------------------------------
// Fixture: the clusterresourceoverride-operator chain in 4.10
// ----------------------------------------------------------------------

const DISTGIT: &str = "clusterresourceoverride-operator";
const GITHUB: &str = "cluster-resource-override-admission-operator";
const BREW: &str = "ose-clusterresourceoverride-operator-container";
const CDN: &str = "redhat-openshift4-ose-clusterresourceoverride-rhel8-operator";
const DELIVERY: &str = "openshift4/ose-clusterresourceoverride-rhel8-operator";
const VARIANT: &str = "8Base-RHOSE-4.10";

struct Fixture {
    build_data: FakeBuildData,
    tables: FakeTables,
    koji: FakeKoji,
    errata: FakeErrata,
    pyxis: FakePyxis,
}

impl Fixture {
    fn scenario() -> Self {
        let mut build_data = FakeBuildData::default();
        let recipe: ImageRecipe = serde_json::from_value(serde_json::json!({
            "name": "openshift/ose-clusterresourceoverride-operator",
            "distgit": {"component": BREW},
            "update-csv": {"manifests-dir": "manifests/"}
        }))
        .unwrap();
        build_data.recipes.insert(DISTGIT.to_string(), recipe);
        build_data.github_repos.push(GITHUB.to_string());
        build_data.distgit_repos.push(DISTGIT.to_string());

        let mut tables = FakeTables::default();
        tables.upstream.insert(&format!("openshift/{GITHUB}"), DISTGIT);
        tables.components.insert(BREW, DISTGIT);

        let mut koji = FakeKoji::default();
        koji.ids.insert(BREW.to_string(), 79952);

        let mut errata = FakeErrata::default();
        errata
            .package_tags
            .insert(BREW.to_string(), vec![CDN.to_string()]);
        errata.repos.insert(
            CDN.to_string(),
            CdnRepoDetails {
                id: Some(11768),
                external_name: Some(DELIVERY.to_string()),
                variants: vec![VariantRef {
                    id: 3023,
                    name: VARIANT.to_string(),
                }],
                packages: vec![BREW.to_string()],
            },
        );
        errata.product_versions.insert(3023, 1126);

        let mut pyxis = FakePyxis::default();
        pyxis
            .packages
            .insert(DELIVERY.to_string(), vec![BREW.to_string()]);
        pyxis
            .ids
            .insert(DELIVERY.to_string(), "61f0b42ac9e8b5094f8da847".to_string());

        Self {
            build_data,
            tables,
            koji,
            errata,
            pyxis,
        }
    }

    fn resolver(self) -> PipelineResolver {
        let lookups = PipelineLookups::new(
            Arc::new(self.build_data),
            Arc::new(self.tables),
            Arc::new(self.koji),
            Arc::new(self.errata),
            Arc::new(self.pyxis),
        );
        PipelineResolver::new(lookups, Arc::new(Settings::default()))
    }
}

fn stage_order(report: &str, identifiers: &[&str]) -> bool {
    let mut last = 0;
    for id in identifiers {
        match report[last..].find(id) {
            Some(pos) => last += pos,
            None => return false,
        }
    }
    true
}

// ----------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------

#[tokio::test]
async fn distgit_resolution_reports_all_stages_in_order() {
    let sink = RecordingSink::default();
    let resolver = Fixture::scenario().resolver();

    resolver
        .resolve_from_distgit(&sink, DISTGIT, Some("4.10"))
        .await;

    let says = sink.says();
    assert_eq!(says.len(), 2, "acknowledgement plus final report");
    assert_eq!(says[0], "Fetching data. Please wait...");

    let report = sink.final_say();
    assert!(
        stage_order(&report, &[GITHUB, DISTGIT, BREW, CDN, DELIVERY]),
        "stages out of order in report:\n{report}"
    );
    // Bundle annotation for the operator component.
    assert!(report.contains("Bundle Component: *ose-clusterresourceoverride-operator-metadata-component*"));
    assert!(report.contains(&format!("Bundle Distgit: *{DISTGIT}-bundle*")));
    assert!(sink.monitoring().is_empty());
}

#[tokio::test]
async fn github_resolution_walks_the_same_chain() {
    let sink = RecordingSink::default();
    let resolver = Fixture::scenario().resolver();

    resolver
        .resolve_from_github(&sink, &format!("https://github.com/openshift/{GITHUB}"), Some("4.10"))
        .await;

    let report = sink.final_say();
    assert!(stage_order(&report, &[GITHUB, DISTGIT, BREW, CDN, DELIVERY]));
}

#[tokio::test]
async fn brew_and_cdn_and_delivery_entry_points_converge() {
    for entry in ["brew", "cdn", "delivery"] {
        let sink = RecordingSink::default();
        let resolver = Fixture::scenario().resolver();

        match entry {
            "brew" => resolver.resolve_from_brew(&sink, BREW, Some("4.10")).await,
            "cdn" => resolver.resolve_from_cdn(&sink, CDN, Some("4.10")).await,
            _ => {
                resolver
                    .resolve_from_delivery(&sink, DELIVERY, Some("4.10"))
                    .await;
            }
        }

        let report = sink.final_say();
        for id in [GITHUB, DISTGIT, BREW, CDN, DELIVERY] {
            assert!(
                report.contains(id),
                "entry `{entry}` report missing `{id}`:\n{report}"
            );
        }
        assert!(
            sink.monitoring().is_empty(),
            "entry `{entry}` raised: {:?}",
            sink.monitoring()
        );
    }
}

#[tokio::test]
async fn multiple_cdn_mappings_fan_out_complete_chains() {
    let mut fixture = Fixture::scenario();
    let second_cdn = "redhat-openshift4-ose-clusterresourceoverride-rhel9-operator";
    let second_delivery = "openshift4/ose-clusterresourceoverride-rhel9-operator";

    fixture
        .errata
        .package_tags
        .get_mut(BREW)
        .unwrap()
        .push(second_cdn.to_string());
    fixture.errata.repos.insert(
        second_cdn.to_string(),
        CdnRepoDetails {
            id: Some(11769),
            external_name: Some(second_delivery.to_string()),
            variants: vec![VariantRef {
                id: 3023,
                name: VARIANT.to_string(),
            }],
            packages: vec![BREW.to_string()],
        },
    );
    fixture
        .pyxis
        .ids
        .insert(second_delivery.to_string(), "61f0b42ac9e8b5094f8da848".to_string());

    let sink = RecordingSink::default();
    let resolver = fixture.resolver();
    resolver
        .resolve_from_distgit(&sink, DISTGIT, Some("4.10"))
        .await;

    let report = sink.final_say();
    assert!(report.contains("*Found more than one Brew to CDN mappings:*"));
    assert!(report.contains(CDN));
    assert!(report.contains(second_cdn));
    assert!(report.contains(DELIVERY));
    assert!(report.contains(second_delivery));
}

#[tokio::test]
async fn downstream_failure_keeps_the_partial_report() {
    let mut fixture = Fixture::scenario();
    // GitHub→Distgit and the recipe resolve fine; the Brew stage then dies.
    fixture.koji.ids.clear();

    let sink = RecordingSink::default();
    let resolver = fixture.resolver();
    resolver.resolve_from_github(&sink, GITHUB, Some("4.10")).await;

    let report = sink.final_say();
    assert!(report.contains(GITHUB), "upstream lines lost:\n{report}");
    assert!(report.contains(DISTGIT), "distgit line lost:\n{report}");
    assert!(report.contains("Brew ID not found"));

    let monitoring = sink.monitoring();
    assert_eq!(monitoring.len(), 1);
    assert!(monitoring[0].starts_with("ERROR: "));
}

#[tokio::test]
async fn unknown_starting_node_short_circuits() {
    let fixture = Fixture::scenario();

    // Keep handles on the downstream fakes so their call counters stay
    // observable after the resolver takes ownership.
    let tables = Arc::new(FakeTables {
        upstream: fixture.tables.upstream.clone(),
        components: fixture.tables.components.clone(),
        calls: AtomicUsize::new(0),
    });
    let koji = Arc::new(FakeKoji::default());
    let errata = Arc::new(FakeErrata::default());

    let lookups = PipelineLookups::new(
        Arc::new(fixture.build_data),
        Arc::clone(&tables) as Arc<dyn ComponentTablesPort>,
        Arc::clone(&koji) as Arc<dyn KojiPort>,
        Arc::clone(&errata) as Arc<dyn ErrataPort>,
        Arc::new(fixture.pyxis),
    );
    let resolver = PipelineResolver::new(lookups, Arc::new(Settings::default()));

    let sink = RecordingSink::default();
    resolver
        .resolve_from_distgit(&sink, "no-such-distgit", Some("4.10"))
        .await;

    let says = sink.says();
    assert_eq!(says.len(), 1, "exactly one reply, no acknowledgement");
    assert!(says[0].contains("No distgit repo with name *no-such-distgit* exists"));

    assert_eq!(tables.calls.load(Ordering::SeqCst), 0);
    assert_eq!(koji.calls.load(Ordering::SeqCst), 0);
    assert_eq!(errata.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn internal_service_failures_point_at_the_art_team() {
    let mut fixture = Fixture::scenario();
    fixture.errata.fail_with = Some(|| ResolveError::KerberosAuthenticationError {
        service: "Errata".to_string(),
    });

    let sink = RecordingSink::default();
    let resolver = fixture.resolver();
    resolver
        .resolve_from_distgit(&sink, DISTGIT, Some("4.10"))
        .await;

    let report = sink.final_say();
    assert!(report.contains("Contact the ART Team"), "got:\n{report}");
    assert_eq!(sink.monitoring().len(), 1);
}

#[tokio::test]
async fn default_version_is_4_10() {
    let sink = RecordingSink::default();
    let resolver = Fixture::scenario().resolver();

    resolver.resolve_from_distgit(&sink, DISTGIT, None).await;

    // The fixture only knows the 4.10 variant, so a successful chain means
    // the default context was applied.
    assert!(sink.final_say().contains(CDN));
}
