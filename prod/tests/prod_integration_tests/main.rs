// Licensed under the Apache-2.0 license

mod helpers;

mod test_cmpu;
mod test_dmpu;
mod test_log;
mod test_otp_faults;
