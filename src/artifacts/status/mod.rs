pub(crate) mod status_report;
