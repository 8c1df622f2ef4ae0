// Licensed under the Apache-2.0 license

use crate::helpers::{cm_device, cmpu_request, Workspace};
use cc_prod::cc_prod_cmpu;
use cc_prod_drivers::printer::set_output_hook;
use std::sync::Mutex;

static LOG: Mutex<String> = Mutex::new(String::new());

fn capture(s: &str) {
    LOG.lock().unwrap().push_str(s);
}

#[test]
fn test_cmpu_trace_reaches_output_hook() {
    set_output_hook(capture);

    let mut hal = cm_device();
    let mut ws = Workspace::new();
    cc_prod_cmpu(&mut hal, &cmpu_request(), &mut ws.0).unwrap();

    let log = LOG.lock().unwrap();
    assert!(log.contains("[cmpu] ++\n"));
    assert!(log.contains("[cmpu] --\n"));
}
