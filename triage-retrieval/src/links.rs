//! Console links for evidence items, so a reviewer can see the proof
//! behind every finding.

use triage_core::models::{EvidenceLink, LinkKind, RawHit, SourceKind, TimeRange};

/// Builds links into the observability console. With no base URL
/// configured, findings carry no links.
#[derive(Debug, Clone, Default)]
pub struct ConsoleLinks {
    base_url: Option<String>,
}

impl ConsoleLinks {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url: base_url.map(|u| u.trim_end_matches('/').to_string()),
        }
    }

    /// All applicable links for a hit: Discover always, an APM trace
    /// link when a trace id is present, the metrics dashboard for
    /// metric hits.
    pub fn for_hit(
        &self,
        hit: &RawHit,
        kind: SourceKind,
        time_range: Option<&TimeRange>,
    ) -> Vec<EvidenceLink> {
        let Some(base) = &self.base_url else {
            return Vec::new();
        };

        let mut links = vec![self.discover(base, time_range)];
        if let Some(trace_id) = &hit.trace_id {
            links.push(Self::apm_trace(base, trace_id, hit.service.as_deref()));
        }
        if kind == SourceKind::Metric {
            links.push(Self::metrics_dashboard(base, time_range));
        }
        links
    }

    fn discover(&self, base: &str, time_range: Option<&TimeRange>) -> EvidenceLink {
        let window = match time_range {
            Some(r) => format!(
                "from={}&to={}",
                r.start.to_rfc3339(),
                r.end.to_rfc3339()
            ),
            None => "from=now-1h&to=now".to_string(),
        };
        EvidenceLink {
            kind: LinkKind::Discover,
            label: "Discover".to_string(),
            url: format!("{base}/app/discover#/?{window}"),
        }
    }

    fn apm_trace(base: &str, trace_id: &str, service: Option<&str>) -> EvidenceLink {
        let mut url = format!("{base}/app/apm/traces/{trace_id}");
        if let Some(service) = service {
            url.push_str(&format!("?serviceName={service}"));
        }
        EvidenceLink {
            kind: LinkKind::ApmTrace,
            label: "APM Trace".to_string(),
            url,
        }
    }

    fn metrics_dashboard(base: &str, time_range: Option<&TimeRange>) -> EvidenceLink {
        let url = match time_range {
            Some(r) => format!(
                "{base}/app/metrics#from={}&to={}",
                r.start.to_rfc3339(),
                r.end.to_rfc3339()
            ),
            None => format!("{base}/app/metrics"),
        };
        EvidenceLink {
            kind: LinkKind::MetricsDashboard,
            label: "Metrics Dashboard".to_string(),
            url,
        }
    }
}
