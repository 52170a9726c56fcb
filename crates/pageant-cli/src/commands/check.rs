use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Result};

use pageant_core::PageManifest;

/// Validate a page manifest: build the document and report anchors whose
/// fragments never resolve, plus duplicate ids. Fails when fragments
/// dangle so the check can gate a site build.
pub fn run(page: &Path) -> Result<()> {
    let manifest = PageManifest::load(page)?;
    let doc = manifest.build()?;

    println!("page:     {}", doc.url());
    println!("blocks:   {}", doc.len());
    println!("height:   {}", doc.content_height());

    let mut id_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for (_, el) in doc.elements() {
        if let Some(id) = el.id.as_deref() {
            *id_counts.entry(id).or_default() += 1;
        }
    }
    for (id, count) in &id_counts {
        if *count > 1 {
            println!("warning:  id #{} defined {} times", id, count);
        }
    }

    let anchors = doc.query_selector_all(r##"a[href*="#"]"##);
    println!("anchors:  {}", anchors.len());

    let mut dangling = 0usize;
    for node in anchors {
        let Some(el) = doc.get(node) else { continue };
        let Some(href) = el.href() else { continue };
        let Some(hash_index) = href.find('#') else { continue };

        // Cross-page anchors resolve on their own page; only same-page
        // fragments are checked here
        let same_page = hash_index == 0
            || doc.resolve_href(href).is_some_and(|url| {
                url.path() == doc.url().path()
                    && url.query().unwrap_or("") == doc.url().query().unwrap_or("")
            });
        if !same_page {
            continue;
        }

        let fragment = &href[hash_index + 1..];
        if doc.element_by_id(fragment).is_none() {
            println!("warning:  anchor \"{}\" resolves to nothing", href);
            dangling += 1;
        }
    }

    if dangling > 0 {
        bail!("{} unresolvable fragment link(s)", dangling);
    }

    println!("ok");
    Ok(())
}
