//! Content records rendered on the page.
//!
//! The catalog owns the copy; the reveal core only reads it.  Structural
//! checks happen here, at the boundary: a record without a usable title is
//! rejected and never reaches layout or animation.

use tracing::warn;

use super::error::RevealError;

/// Name of a glyph in the icon table (e.g. `"git-branch"`).  Resolution
/// happens at render time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IconRef(String);

impl IconRef {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn key(&self) -> &str {
        &self.0
    }
}

/// A headline card with a short list of feature rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Benefit {
    pub icon: IconRef,
    pub title: String,
    pub description: String,
    pub features: Vec<String>,
}

impl Benefit {
    pub fn new(
        icon: IconRef,
        title: impl Into<String>,
        description: impl Into<String>,
        features: Vec<String>,
    ) -> Result<Self, RevealError> {
        let title = checked_title("benefit", title.into())?;
        Ok(Self {
            icon,
            title,
            description: description.into(),
            features,
        })
    }
}

/// A titled card whose items render as a tree listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    pub title: String,
    pub description: String,
    pub icon: IconRef,
    pub items: Vec<String>,
}

impl CategoryGroup {
    pub fn new(
        icon: IconRef,
        title: impl Into<String>,
        description: impl Into<String>,
        items: Vec<String>,
    ) -> Result<Self, RevealError> {
        let title = checked_title("category group", title.into())?;
        Ok(Self {
            title,
            description: description.into(),
            icon,
            items,
        })
    }
}

fn checked_title(kind: &'static str, title: String) -> Result<String, RevealError> {
    if title.trim().is_empty() {
        return Err(RevealError::malformed(kind, "title is empty"));
    }
    Ok(title)
}

/// The ordered records for one page.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub benefits: Vec<Benefit>,
    pub groups: Vec<CategoryGroup>,
}

impl Catalog {
    /// Keep every well-formed record, logging and dropping the rest.
    pub fn from_records(
        benefits: impl IntoIterator<Item = Result<Benefit, RevealError>>,
        groups: impl IntoIterator<Item = Result<CategoryGroup, RevealError>>,
    ) -> Self {
        Self {
            benefits: keep_valid(benefits),
            groups: keep_valid(groups),
        }
    }

    /// The stock landing-page content.
    pub fn builtin() -> Self {
        let benefits = [
            (
                "git-branch",
                "Production Excellence",
                "Leverage proven open source tools like FluxCD, Crossplane, and Backstage for robust, scalable infrastructure",
                &["Version Control", "Zero Drift", "Instant Rollbacks"][..],
            ),
            (
                "lock",
                "Security & Compliance",
                "Military-grade security with automated compliance and continuous monitoring",
                &["SOC2 Compliant", "Zero-Trust", "RBAC Enabled"][..],
            ),
            (
                "cloud",
                "Cloud Native",
                "Built for modern cloud infrastructure with multi-cloud support",
                &["Multi-Cloud", "Auto-Scaling", "High Availability"][..],
            ),
            (
                "workflow",
                "Automated Operations",
                "End-to-end automation with self-healing systems and continuous delivery",
                &["99.99% Uptime", "24/7 Operations", "Auto Recovery"][..],
            ),
        ]
        .into_iter()
        .map(|(icon, title, description, features)| {
            Benefit::new(IconRef::new(icon), title, description, owned(features))
        });

        let groups = [
            (
                "git-branch",
                "GitOps Delivery",
                "Declarative, pull-based deployments reconciled from Git",
                &["FluxCD", "Argo CD", "Kustomize", "Helm", "Flagger", "Renovate"][..],
            ),
            (
                "layers",
                "Infrastructure as Code",
                "Provision and compose cloud resources through Kubernetes APIs",
                &["Crossplane", "Terraform", "OpenTofu", "Pulumi"][..],
            ),
            (
                "shield",
                "Security",
                "Policy, secrets and supply-chain controls enforced at every step",
                &["Kyverno", "OPA Gatekeeper", "Sealed Secrets", "cert-manager", "Trivy"][..],
            ),
            (
                "activity",
                "Observability",
                "Metrics, logs and traces wired in from day one",
                &["Prometheus", "Grafana", "Loki", "Tempo", "OpenTelemetry"][..],
            ),
            (
                "terminal",
                "Developer Portal",
                "Golden paths and self-service templates for every team",
                &["Backstage", "Software Templates", "TechDocs"][..],
            ),
        ]
        .into_iter()
        .map(|(icon, title, description, items)| {
            CategoryGroup::new(IconRef::new(icon), title, description, owned(items))
        });

        Self::from_records(benefits, groups)
    }

    pub fn is_empty(&self) -> bool {
        self.benefits.is_empty() && self.groups.is_empty()
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn keep_valid<T>(records: impl IntoIterator<Item = Result<T, RevealError>>) -> Vec<T> {
    records
        .into_iter()
        .filter_map(|record| match record {
            Ok(r) => Some(r),
            Err(e) => {
                warn!("skipping record: {e}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_titles_are_rejected() {
        let err = Benefit::new(IconRef::new("cloud"), "   ", "", Vec::new()).unwrap_err();
        assert!(matches!(err, RevealError::MalformedRecord { kind: "benefit", .. }));

        let err = CategoryGroup::new(IconRef::new("cloud"), "", "", Vec::new()).unwrap_err();
        assert!(matches!(err, RevealError::MalformedRecord { kind: "category group", .. }));
    }

    #[test]
    fn empty_lists_are_well_formed() {
        let group = CategoryGroup::new(IconRef::new("cloud"), "Empty", "", Vec::new());
        assert!(group.is_ok());
    }

    #[test]
    fn malformed_records_are_dropped_at_the_boundary() {
        let catalog = Catalog::from_records(
            vec![
                Benefit::new(IconRef::new("lock"), "Kept", "", vec!["a".into()]),
                Benefit::new(IconRef::new("lock"), "", "", Vec::new()),
            ],
            vec![CategoryGroup::new(IconRef::new("shield"), "\t", "", Vec::new())],
        );
        assert_eq!(catalog.benefits.len(), 1);
        assert_eq!(catalog.benefits[0].title, "Kept");
        assert!(catalog.groups.is_empty());
        assert!(!catalog.is_empty());
    }

    #[test]
    fn builtin_catalog_is_complete() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.benefits.len(), 4);
        assert_eq!(catalog.benefits[0].features, ["Version Control", "Zero Drift", "Instant Rollbacks"]);
        assert!(!catalog.groups.is_empty());
        assert!(catalog.groups.iter().all(|g| !g.items.is_empty()));
    }
}
