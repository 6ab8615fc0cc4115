use chrono::Utc;
use serde_json::json;

use crate::models::profile::{Education, Experience, Profile, ProfileSource};

const MOCK_PROFILE_URL: &str = "https://www.linkedin.com/in/sarah-johnson-dev";

fn experience(
    title: &str,
    company: &str,
    duration: &str,
    location: &str,
    description: &str,
) -> Experience {
    Experience {
        title: title.to_string(),
        company: company.to_string(),
        duration: duration.to_string(),
        location: location.to_string(),
        description: description.to_string(),
    }
}

/// Demo profile returned whenever a live scrape is not possible.
pub fn mock_profile(profile_url: &str) -> Profile {
    let profile_url = if profile_url.trim().is_empty() {
        MOCK_PROFILE_URL
    } else {
        profile_url
    };

    Profile {
        name: "Sarah Johnson".to_string(),
        headline: "Senior Software Engineer | Full-Stack Developer | Tech Lead".to_string(),
        location: "San Francisco, California, United States".to_string(),
        industry: "Computer Software".to_string(),
        summary: "Experienced Senior Software Engineer with 7+ years of expertise \
            in full-stack development, team leadership, and scalable system architecture. \
            Passionate about building innovative solutions that drive business growth and \
            enhance user experience. Proven track record of leading cross-functional teams \
            and delivering high-quality software products in fast-paced environments.\n\n\
            Key Achievements:\n\
            • Led development of microservices architecture serving 2M+ users\n\
            • Reduced system latency by 40% through performance optimization\n\
            • Mentored 15+ junior developers and established coding best practices\n\
            • Architected CI/CD pipelines improving deployment efficiency by 60%"
            .to_string(),
        experience: vec![
            experience(
                "Senior Software Engineer",
                "TechCorp Inc.",
                "2021 - Present",
                "San Francisco, CA",
                "Lead full-stack development of enterprise SaaS platform. Manage team of 5 \
                 engineers, architect scalable solutions, and drive technical decision-making. \
                 Technologies: React, Node.js, Python, AWS, Docker, Kubernetes.",
            ),
            experience(
                "Software Engineer",
                "StartupXYZ",
                "2019 - 2021",
                "San Francisco, CA",
                "Developed core platform features and APIs. Built real-time data processing \
                 pipelines handling 100k+ events/minute. Implemented automated testing and \
                 deployment processes.",
            ),
            experience(
                "Junior Software Developer",
                "Digital Solutions Ltd",
                "2017 - 2019",
                "Seattle, WA",
                "Contributed to web application development using React and Django. \
                 Collaborated with design team to implement responsive user interfaces and \
                 optimize user experience.",
            ),
        ],
        education: vec![Education {
            school: "University of California, Berkeley".to_string(),
            degree: "Bachelor of Science in Computer Science".to_string(),
            duration: "2013 - 2017".to_string(),
            description: "Relevant Coursework: Data Structures, Algorithms, Software \
                Engineering, Database Systems, Computer Networks"
                .to_string(),
        }],
        skills: [
            "JavaScript",
            "Python",
            "React",
            "Node.js",
            "AWS",
            "Docker",
            "Kubernetes",
            "MongoDB",
            "PostgreSQL",
            "Redis",
            "GraphQL",
            "REST APIs",
            "Microservices",
            "CI/CD",
            "Git",
            "Agile/Scrum",
            "Team Leadership",
            "System Architecture",
            "Performance Optimization",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        connections: 1247,
        profile_url: profile_url.to_string(),
        profile_image: "https://via.placeholder.com/200x200".to_string(),
        company: "TechCorp Inc.".to_string(),
        school: "UC Berkeley".to_string(),
        languages: vec![
            json!({"name": "English", "proficiency": "Native"}),
            json!({"name": "Spanish", "proficiency": "Professional"}),
        ],
        certifications: vec![
            json!({
                "name": "AWS Certified Solutions Architect",
                "issuer": "Amazon Web Services",
                "date": "2022"
            }),
            json!({
                "name": "Certified Kubernetes Administrator",
                "issuer": "Cloud Native Computing Foundation",
                "date": "2021"
            }),
        ],
        volunteer: vec![json!({
            "organization": "Girls Who Code",
            "role": "Volunteer Instructor",
            "duration": "2020 - Present",
            "description": "Teaching coding fundamentals to underrepresented youth in tech"
        })],
        projects: Vec::new(),
        source: ProfileSource::Mock,
        scraped_at: Some(Utc::now()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_profile_defaults_url() {
        assert_eq!(mock_profile("").profile_url, MOCK_PROFILE_URL);
        assert_eq!(mock_profile("linkedin.com/in/x").profile_url, "linkedin.com/in/x");
    }

    #[test]
    fn test_mock_profile_shape() {
        let profile = mock_profile("");
        assert_eq!(profile.source, ProfileSource::Mock);
        assert_eq!(profile.experience.len(), 3);
        assert_eq!(profile.skills.len(), 19);
        assert!(profile.summary.contains("\n\nKey Achievements:\n• Led development"));
    }
}
