pub mod db;
pub mod memory;
pub mod cart {
    pub mod storage;
}
