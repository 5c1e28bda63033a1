use std::fmt::Write;

use super::{escape, layout};
use crate::supply_chain::attestation::AttestationCard;
use crate::supply_chain::policy::PolicyCard;
use crate::supply_chain::vulnerability::{ScanCard, ScanStatus};
use crate::supply_chain::{Panel, SecurityOverview};

/// Supply-chain security page for one entity.
pub fn security_page(overview: &SecurityOverview) -> String {
    let mut body = String::new();

    let _ = writeln!(
        body,
        "<p class=\"muted\">{} <span class=\"chip\" title=\"{}\" style=\"background:{};color:{}\">{}</span></p>",
        escape(&overview.subtitle),
        escape(overview.slsa.tooltip),
        overview.slsa.background,
        overview.slsa.color,
        escape(&overview.slsa.label),
    );

    body.push_str("<div class=\"grid\">\n");
    render_panel(&mut body, AttestationCard::DISABLED_TITLE, &overview.attestation, attestation);
    render_panel(&mut body, ScanCard::TITLE, &overview.vulnerabilities, scan);
    body.push_str("</div>\n");
    render_panel(&mut body, PolicyCard::TITLE, &overview.policies, policy);

    layout(overview.title, &body)
}

fn render_panel<T>(out: &mut String, title: &str, panel: &Panel<T>, render: fn(&mut String, &T)) {
    match panel {
        Panel::Ready(card) => render(out, card),
        Panel::Failed { error } => {
            let _ = writeln!(
                out,
                "<div class=\"card\"><h3>{}</h3><p class=\"error\">{}</p></div>",
                escape(title),
                escape(error)
            );
        }
    }
}

fn notice(out: &mut String, title: &str, message: &str) {
    let _ = writeln!(
        out,
        "<div class=\"card\"><h3>{}</h3><p class=\"muted\">{}</p></div>",
        escape(title),
        escape(message)
    );
}

fn attestation(out: &mut String, card: &AttestationCard) {
    match card {
        AttestationCard::Disabled { message } => notice(out, AttestationCard::DISABLED_TITLE, message),
        AttestationCard::MissingImage { message } => notice(out, AttestationCard::DISABLED_TITLE, message),
        AttestationCard::Ready {
            title,
            attestation,
            links,
        } => {
            let (color, headline) = if attestation.verified {
                ("green", "Signature Verified")
            } else {
                ("red", "Verification Failed")
            };
            let _ = write!(
                out,
                "<div class=\"card\"><h3>{title}</h3>\
<p><a href=\"{deep}\" rel=\"noopener noreferrer\" target=\"_blank\">View in Rekor</a></p>\
<h4 style=\"color:{color}\">{headline}</h4>\n<dl>\
<dt>Predicate Type</dt><dd>{predicate}</dd>\
<dt>Issuer</dt><dd>{issuer}</dd>\
<dt>Workflow</dt><dd>{workflow}</dd>\
<dt>Git SHA</dt><dd><a href=\"{commit_url}\" rel=\"noopener noreferrer\" target=\"_blank\">{git_sha}</a></dd>\
<dt>Image Digest</dt><dd class=\"mono\">{digest}</dd>\
<dt>Rekor Log ID</dt><dd><a class=\"mono\" href=\"{rekor_url}\" rel=\"noopener noreferrer\" target=\"_blank\">{rekor_short}</a></dd>\
<dt>Timestamp</dt><dd>{timestamp}</dd>\
</dl>\n<p class=\"muted\">Verification command:</p><pre class=\"mono\">{command}</pre></div>\n",
                title = escape(title),
                deep = escape(&links.deep_link),
                predicate = escape(&attestation.predicate_type),
                issuer = escape(&attestation.issuer),
                workflow = escape(&attestation.workflow),
                commit_url = escape(&links.commit_url),
                git_sha = escape(&attestation.git_sha),
                digest = escape(&attestation.digest),
                rekor_url = escape(&links.rekor_entry_url),
                rekor_short = escape(&links.rekor_log_id_short),
                timestamp = attestation.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
                command = escape(&links.verify_command),
            );
        }
    }
}

fn scan(out: &mut String, card: &ScanCard) {
    match card {
        ScanCard::NotConfigured { message } => notice(out, ScanCard::TITLE, message),
        ScanCard::Ready {
            title,
            summary,
            total,
            tiles,
            security_url,
            notes,
        } => {
            let color = match summary.status {
                ScanStatus::Passed => "green",
                ScanStatus::Failed => "red",
            };
            let _ = write!(
                out,
                "<div class=\"card\"><h3>{}</h3><h4 style=\"color:{}\">{} <span class=\"chip\">{} Total</span></h4>\n<div class=\"grid\">",
                escape(title),
                color,
                summary.status.headline(),
                total,
            );
            for tile in tiles {
                let background = tile.background.unwrap_or("transparent");
                let _ = write!(
                    out,
                    "<div class=\"card\" style=\"text-align:center;background:{}\"><h2 style=\"color:{}\">{}</h2><span class=\"muted\">{}</span></div>",
                    background,
                    tile.icon_color,
                    tile.count,
                    tile.severity.label(),
                );
            }
            let _ = write!(
                out,
                "</div>\n<p class=\"muted\">Last scanned: {}</p>",
                summary.scan_time.format("%Y-%m-%d %H:%M:%S UTC")
            );
            for note in notes {
                let _ = write!(out, "<p class=\"muted\"><small>{}</small></p>", escape(note));
            }
            let _ = writeln!(
                out,
                "<p><a href=\"{}\" rel=\"noopener noreferrer\" target=\"_blank\">View detailed scan results in GitHub Security &rarr;</a></p></div>",
                escape(security_url)
            );
        }
    }
}

fn policy(out: &mut String, card: &PolicyCard) {
    match card {
        PolicyCard::NotEnforced { message } => notice(out, PolicyCard::TITLE, message),
        PolicyCard::Ready {
            title,
            report,
            enforced_policies,
            ..
        } => {
            let summary = &report.summary;
            let _ = write!(
                out,
                "<div class=\"card\"><h3>{}</h3><div class=\"grid\">\
<div><h2 style=\"color:green\">{}</h2>PASS</div>\
<div><h2 style=\"color:red\">{}</h2>FAIL</div>\
<div><h2 style=\"color:orange\">{}</h2>WARN</div>\
<div><h2 style=\"color:gray\">{}</h2>SKIP</div></div>\n\
<table><thead><tr><th>Status</th><th>Policy</th><th>Rule</th><th>Category</th><th>Message</th></tr></thead><tbody>\n",
                escape(title),
                summary.pass,
                summary.fail,
                summary.warn,
                summary.skip,
            );
            for result in &report.results {
                let _ = writeln!(
                    out,
                    "<tr><td><span class=\"chip\" style=\"background:{};color:white\">{}</span></td><td><strong>{}</strong></td><td>{}</td><td><span class=\"chip\">{}</span></td><td class=\"muted\">{}</td></tr>",
                    result.status.chip_color(),
                    result.status.label(),
                    escape(&result.policy),
                    escape(&result.rule),
                    escape(&result.category),
                    escape(&result.message),
                );
            }
            let _ = writeln!(
                out,
                "</tbody></table><p class=\"muted\"><small>Policies enforced: {}</small></p></div>",
                enforced_policies.join(", ")
            );
        }
    }
}
