//! Built-in articles served when the encyclopedia cannot answer

use crate::models::{ArticleSource, CityArticle};

struct MockEntry {
    city: &'static str,
    country: &'static str,
    title: &'static str,
    summary: &'static str,
    description: &'static str,
    thumbnail: &'static str,
    url: &'static str,
}

impl MockEntry {
    fn to_article(&self) -> CityArticle {
        CityArticle {
            city: self.city.to_string(),
            country: self.country.to_string(),
            title: self.title.to_string(),
            summary: self.summary.to_string(),
            description: self.description.to_string(),
            thumbnail: self.thumbnail.to_string(),
            url: self.url.to_string(),
            source: ArticleSource::Mock,
        }
    }
}

const MOCK_ARTICLES: [MockEntry; 3] = [
    MockEntry {
        city: "Tokyo",
        country: "Japan",
        title: "Tokyo",
        summary: "도쿄는 일본의 수도이자 가장 큰 도시예요. 높은 빌딩과 오래된 신사가 함께 있고, \
                  세계에서 사람이 가장 많이 사는 도시권 중 하나랍니다.",
        description: "일본의 수도",
        thumbnail: "https://upload.wikimedia.org/wikipedia/commons/thumb/b/b2/Skyscrapers_of_Shinjuku_2009_January.jpg/320px-Skyscrapers_of_Shinjuku_2009_January.jpg",
        url: "https://en.wikipedia.org/wiki/Tokyo",
    },
    MockEntry {
        city: "Paris",
        country: "France",
        title: "Paris",
        summary: "파리는 프랑스의 수도예요. 에펠탑과 루브르 박물관이 있어서 \
                  예술과 빛의 도시라고 불린답니다.",
        description: "프랑스의 수도",
        thumbnail: "https://upload.wikimedia.org/wikipedia/commons/thumb/4/4b/La_Tour_Eiffel_vue_de_la_Tour_Saint-Jacques%2C_Paris_ao%C3%BBt_2014_%282%29.jpg/320px-La_Tour_Eiffel_vue_de_la_Tour_Saint-Jacques%2C_Paris_ao%C3%BBt_2014_%282%29.jpg",
        url: "https://en.wikipedia.org/wiki/Paris",
    },
    MockEntry {
        city: "New York",
        country: "United States",
        title: "New York City",
        summary: "뉴욕은 미국에서 가장 큰 도시예요. 자유의 여신상과 센트럴 파크가 있고, \
                  전 세계 사람들이 모여 사는 곳이랍니다.",
        description: "미국 최대의 도시",
        thumbnail: "https://upload.wikimedia.org/wikipedia/commons/thumb/7/7a/View_of_Empire_State_Building_from_Rockefeller_Center_New_York_City_dllu_%28cropped%29.jpg/320px-View_of_Empire_State_Building_from_Rockefeller_Center_New_York_City_dllu_%28cropped%29.jpg",
        url: "https://en.wikipedia.org/wiki/New_York_City",
    },
];

/// Built-in article for `city`, matched exactly (case-sensitive)
#[must_use]
pub fn mock_article(city: &str) -> Option<CityArticle> {
    MOCK_ARTICLES
        .iter()
        .find(|entry| entry.city == city)
        .map(MockEntry::to_article)
}

/// Generic article built from the city and optional country
#[must_use]
pub fn template_article(city: &str, country: Option<&str>) -> CityArticle {
    let country = country.map(str::trim).unwrap_or_default();
    let summary = if country.is_empty() {
        format!("{city}은(는) 여행자들이 찾는 매력적인 도시예요. 함께 {city}의 문화와 역사를 알아봐요!")
    } else {
        format!(
            "{city}은(는) {country}에 있는 매력적인 도시예요. 함께 {city}의 문화와 역사를 알아봐요!"
        )
    };

    CityArticle {
        city: city.to_string(),
        country: country.to_string(),
        title: city.to_string(),
        summary,
        description: format!("{city} 여행 정보"),
        thumbnail: String::new(),
        url: format!(
            "https://ko.wikipedia.org/wiki/{}",
            urlencoding::encode(&city.replace(' ', "_"))
        ),
        source: ArticleSource::Template,
    }
}

/// Built-in article when one exists, otherwise the generic template
#[must_use]
pub fn fallback_article(city: &str, country: Option<&str>) -> CityArticle {
    mock_article(city).unwrap_or_else(|| template_article(city, country))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Tokyo", "Japan")]
    #[case("Paris", "France")]
    #[case("New York", "United States")]
    fn test_mock_entries_are_complete(#[case] city: &str, #[case] country: &str) {
        let article = mock_article(city).unwrap();
        assert_eq!(article.city, city);
        assert_eq!(article.country, country);
        assert_eq!(article.source, ArticleSource::Mock);
        for field in [&article.title, &article.summary, &article.description, &article.thumbnail, &article.url] {
            assert!(!field.is_empty());
        }
    }

    #[rstest]
    #[case("tokyo")]
    #[case("Tokyo ")]
    #[case("도쿄")]
    fn test_mock_lookup_is_exact(#[case] city: &str) {
        assert!(mock_article(city).is_none());
    }

    #[test]
    fn test_template_mentions_country() {
        let article = template_article("Busan", Some("South Korea"));
        assert_eq!(article.source, ArticleSource::Template);
        assert_eq!(article.country, "South Korea");
        assert!(article.summary.contains("South Korea"));
        assert_eq!(article.url, "https://ko.wikipedia.org/wiki/Busan");
    }

    #[test]
    fn test_template_without_country() {
        let article = template_article("Rio de Janeiro", None);
        assert_eq!(article.country, "");
        assert!(article.summary.starts_with("Rio de Janeiro은(는) 여행자들이"));
        assert!(article.url.ends_with("Rio_de_Janeiro"));
    }

    #[test]
    fn test_fallback_prefers_mock_over_template() {
        assert_eq!(fallback_article("Paris", Some("Texas")).country, "France");
        assert_eq!(fallback_article("Lyon", Some("France")).source, ArticleSource::Template);
    }
}
