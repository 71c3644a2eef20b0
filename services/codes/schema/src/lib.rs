pub mod scan_codes;
