use std::sync::Arc;

use crate::api::{AssessmentApi, BlogPost, Category, ContactInfo, Course, CoursePage, CourseQuery};
use crate::error::CatalogError;

/// Course catalog browsing: search, filters, and the marketing pages.
///
/// Unlike the quiz path this surfaces errors to the caller; the catalog
/// views render their own error state.
#[derive(Clone)]
pub struct CatalogService {
    api: Arc<dyn AssessmentApi>,
}

impl CatalogService {
    #[must_use]
    pub fn new(api: Arc<dyn AssessmentApi>) -> Self {
        Self { api }
    }

    /// One page of courses matching the query.
    pub async fn search(&self, query: &CourseQuery) -> Result<CoursePage, CatalogError> {
        Ok(self.api.courses(query).await?)
    }

    pub async fn main_categories(&self) -> Result<Vec<String>, CatalogError> {
        Ok(self.api.main_categories().await?)
    }

    /// Sub-categories within one main category, for the dependent filter.
    pub async fn sub_categories(&self, category: &str) -> Result<Vec<String>, CatalogError> {
        Ok(self.api.sub_categories(category).await?)
    }

    /// Competency filter options within one main category.
    pub async fn competencies(&self, category: &str) -> Result<Vec<String>, CatalogError> {
        Ok(self.api.competencies(category).await?)
    }

    pub async fn popular_courses(&self) -> Result<Vec<Course>, CatalogError> {
        Ok(self.api.popular_courses().await?)
    }

    pub async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.api.categories().await?)
    }

    pub async fn blogs(&self) -> Result<Vec<BlogPost>, CatalogError> {
        Ok(self.api.blogs().await?)
    }

    pub async fn contact(&self) -> Result<ContactInfo, CatalogError> {
        Ok(self.api.contact().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FakeApi;

    fn course(id: u64, title: &str, category: &str) -> Course {
        Course {
            id,
            title: title.into(),
            category: category.into(),
            sub_category: String::new(),
            city: String::new(),
            duration: String::new(),
        }
    }

    #[tokio::test]
    async fn search_filters_by_category_and_text() {
        let api = FakeApi::new();
        api.set_courses(vec![
            course(1, "Leading teams", "Leadership"),
            course(2, "Project planning", "Management"),
            course(3, "Leading change", "Leadership"),
        ]);
        let service = CatalogService::new(Arc::new(api));

        let mut query = CourseQuery::first_page();
        query.category = Some("Leadership".into());
        let page = service.search(&query).await.unwrap();
        assert_eq!(page.total_courses, 2);

        query.search = Some("change".into());
        let page = service.search(&query).await.unwrap();
        assert_eq!(page.courses.len(), 1);
        assert_eq!(page.courses[0].id, 3);
    }
}
