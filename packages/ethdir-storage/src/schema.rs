pub fn render_schema() -> String {
	expand_includes(include_str!("../../../sql/init.sql"))
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"tables/001_listings.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_listings.sql")),
				"tables/002_tags.sql" => out.push_str(include_str!("../../../sql/tables/002_tags.sql")),
				"tables/003_listing_tags.sql" =>
					out.push_str(include_str!("../../../sql/tables/003_listing_tags.sql")),
				"tables/004_listing_votes.sql" =>
					out.push_str(include_str!("../../../sql/tables/004_listing_votes.sql")),
				"views/001_listing_rank_v.sql" =>
					out.push_str(include_str!("../../../sql/views/001_listing_rank_v.sql")),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}
