#![forbid(unsafe_code)]

// The Maps API key arrives via CLI flag or env var. Session and crash records
// include argv for debugging, so the flag value is masked before it is ever
// written out. Env values never enter those records.
pub(crate) fn redact_args(args: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len());
    let mut mask_next = false;
    for arg in args {
        if mask_next {
            out.push("<redacted>".to_string());
            mask_next = false;
            continue;
        }
        if arg.as_str() == "--maps-api-key" {
            mask_next = true;
            out.push(arg);
        } else if arg.starts_with("--maps-api-key=") {
            out.push("--maps-api-key=<redacted>".to_string());
        } else {
            out.push(arg);
        }
    }
    out
}
