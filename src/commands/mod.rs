pub(crate) mod porcelain;
