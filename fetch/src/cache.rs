use std::io::prelude::Read;

use rusqlite::{blob::Blob, Connection, OptionalExtension, Result};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    // numberings are stored in db, so they should only be added to
    Html = 0,
    Json = 1,
}

impl MediaType {
    pub fn new(id: i32) -> Self {
        Self::try_new(id).expect("valid id")
    }

    pub fn try_new(id: i32) -> Option<Self> {
        let ret = match id {
            0 => Self::Html,
            1 => Self::Json,
            _ => return None,
        };
        if id != ret as i32 {
            unreachable!("mislabeled id")
        }
        Some(ret)
    }

    pub fn from_mime(s: &str) -> Self {
        match s {
            "application/json" => MediaType::Json,
            // the wiki endpoint serves text/html for raw pages
            _ => MediaType::Html,
        }
    }

    pub fn from_extension(s: &str) -> Option<Self> {
        let ret = match s {
            "html" | "xhtml" => MediaType::Html,
            "json" => MediaType::Json,
            _ => return None,
        };
        Some(ret)
    }

    pub fn mime(self) -> &'static str {
        match self {
            MediaType::Html => "text/html",
            MediaType::Json => "application/json",
        }
    }
}

pub struct ObjectCache {
    conn: Connection,
}

impl ObjectCache {
    pub fn new(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "
CREATE TABLE IF NOT EXISTS cache_entries (id INTEGER PRIMARY KEY,
                            url TEXT KEY,
                            type INTEGER,
                            content BLOB);
",
        )?;
        Ok(ObjectCache { conn })
    }

    pub fn set(&self, key: &str, val: &str, ty: MediaType) -> Result<()> {
        let mut stmt = self
            .conn
            .prepare_cached("INSERT INTO cache_entries (url, type, content) VALUES (?1, ?2, ?3)")?;
        stmt.execute((key, ty as i64, val.as_bytes()))?;
        Ok(())
    }

    pub fn get<'a>(&'a self, key: &str) -> Result<Option<(MediaType, Blob<'a>)>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, type FROM cache_entries WHERE url=?1 LIMIT 1")?;
        let id: Option<(i64, i64)> = stmt
            .query_row([key], |row| Ok((row.get(0)?, row.get(1)?)))
            .optional()?;
        let Some((id, ty)) = id else { return Ok(None) };
        let ty = MediaType::new(ty as i32);
        let blob = self
            .conn
            .blob_open(rusqlite::MAIN_DB, "cache_entries", "content", id, true)?;
        Ok(Some((ty, blob)))
    }

    pub fn get_string(&self, key: &str) -> Result<Option<(MediaType, String)>> {
        let Some((ty, mut blob)) = self.get(key)? else {
            return Ok(None);
        };
        let mut buf = String::with_capacity(blob.len());
        blob.read_to_string(&mut buf).unwrap();
        Ok(Some((ty, buf)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_cache() -> ObjectCache {
        ObjectCache::new(rusqlite::Connection::open_in_memory().unwrap()).unwrap()
    }

    #[test]
    fn get_and_set() {
        let cache = new_cache();
        assert!(cache.get("key1").unwrap().is_none());
        cache.set("key1", "{\"a\": 1}", MediaType::Json).unwrap();
        let (ty, body) = cache.get_string("key1").unwrap().unwrap();
        assert_eq!(ty, MediaType::Json);
        assert_eq!(body, "{\"a\": 1}");
    }

    #[test]
    fn use_url() {
        let cache = new_cache();
        assert!(cache.get("https://example.com").unwrap().is_none());
        cache
            .set("https://example.com", "<html></html>", MediaType::Html)
            .unwrap();
        let res = cache.get_string("https://example.com").unwrap().unwrap();
        assert_eq!(res.1, "<html></html>");
    }

    #[test]
    fn keys_do_not_collide() {
        let cache = new_cache();
        cache.set("a", "one", MediaType::Html).unwrap();
        cache.set("b", "two", MediaType::Json).unwrap();
        assert_eq!(cache.get_string("a").unwrap().unwrap().1, "one");
        assert_eq!(cache.get_string("b").unwrap().unwrap().1, "two");
    }
}
